//! Topsky 地图文本输出。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mva_core::map::MapBlock;

use crate::{IoError, MapSaver};

/// 按 Topsky 地图语法输出图块，多个图块之间以一个空行分隔。
pub struct TopskyWriter;

impl TopskyWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_to<W: Write>(&self, maps: &[MapBlock], out: &mut W) -> std::io::Result<()> {
        for (index, map) in maps.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "MAP:{}", map.header.name)?;
            writeln!(out, "FOLDER:{}", map.header.folder)?;
            writeln!(out, "COLOR:{}", map.header.color)?;
            writeln!(out, "STYLE:{}", map.header.style)?;
            for entry in map.entries() {
                writeln!(out, "{entry}")?;
            }
        }
        Ok(())
    }

    pub fn render(&self, maps: &[MapBlock]) -> String {
        let mut buffer = Vec::new();
        // 写入内存缓冲不会失败。
        let _ = self.write_to(maps, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for TopskyWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSaver for TopskyWriter {
    fn save(&self, maps: &[MapBlock], path: &Path) -> Result<(), IoError> {
        let write_error = |source| IoError::WriteError {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_error)?;
        let mut out = BufWriter::new(file);
        self.write_to(maps, &mut out).map_err(write_error)?;
        out.flush().map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mva_core::altitude::AltitudeValue;
    use mva_core::geometry::Vertex;
    use mva_core::map::{MapEntry, MapHeader};

    fn block(name: &str) -> MapBlock {
        let mut block = MapBlock::new(MapHeader {
            name: name.to_string(),
            folder: "MVA".to_string(),
            color: "green".to_string(),
            style: "Solid:1".to_string(),
        });
        block.extend_lines([MapEntry::Line {
            from: Vertex::new(52.5, 13.0),
            to: Vertex::new(52.0, 13.0),
        }]);
        block.push_text(
            Vertex::new(52.25, 13.0),
            AltitudeValue::new(3500).expect("positive"),
        );
        block
    }

    #[test]
    fn single_block_has_no_blank_line() {
        let text = TopskyWriter::new().render(&[block("MVA Germany Summer")]);
        assert_eq!(
            text,
            "MAP:MVA Germany Summer\n\
             FOLDER:MVA\n\
             COLOR:green\n\
             STYLE:Solid:1\n\
             LINE:N052.30.00.000:E013.00.00.000:N052.00.00.000:E013.00.00.000\n\
             TEXT:N052.15.00.000:E013.00.00.000:35\n"
        );
    }

    #[test]
    fn blocks_are_separated_by_one_blank_line() {
        let text = TopskyWriter::new().render(&[block("Summer"), block("Winter")]);
        assert!(text.contains("TEXT:N052.15.00.000:E013.00.00.000:35\n\nMAP:Winter\n"));
        assert_eq!(text.matches("\n\n").count(), 1);
    }

    #[test]
    fn save_writes_rendered_text() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("mva.txt");
        let writer = TopskyWriter::new();
        let maps = [block("Summer")];
        writer.save(&maps, &path).expect("write map file");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, writer.render(&maps));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let err = TopskyWriter::new()
            .save(&[block("Summer")], Path::new("/nonexistent/dir/mva.txt"))
            .expect_err("directory does not exist");
        assert!(matches!(err, IoError::WriteError { .. }));
    }
}
