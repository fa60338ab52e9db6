use std::path::{Path, PathBuf};

use mva_core::map::MapBlock;
use thiserror::Error;

pub mod table;
pub mod topsky;
pub mod wkt;

pub use table::{CsvLoader, CsvTable, Row};
pub use topsky::TopskyWriter;
pub use wkt::{parse_geometry, parse_polygon};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// 读取表格数据源。
pub trait TableLoader {
    fn load(&self, path: &Path) -> Result<CsvTable, IoError>;
}

/// 将若干图块写入目标文件。
pub trait MapSaver {
    fn save(&self, maps: &[MapBlock], path: &Path) -> Result<(), IoError>;
}
