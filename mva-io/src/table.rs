use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::{IoError, TableLoader};

/// 带表头的 CSV 内容。行长度允许与表头不一致，缺失的单元格按空值处理。
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader
            .headers()?
            .iter()
            .map(|header| header.to_string())
            .collect();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, records })
    }

    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// 优先使用 `preferred` 列，否则取第一个名称包含 `geometry`（忽略大小写）的列。
    pub fn geometry_column(&self, preferred: &str) -> Option<usize> {
        self.column_index(preferred).or_else(|| {
            self.headers
                .iter()
                .position(|header| header.to_ascii_lowercase().contains("geometry"))
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(move |(index, record)| Row {
                index,
                table: self,
                record,
            })
    }
}

/// 表中的一行，按列名或列序号取值。
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    table: &'a CsvTable,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// 从 0 开始的数据行序号（不含表头）。
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn field(&self, column: usize) -> Option<&'a str> {
        self.record.get(column)
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.table
            .column_index(name)
            .and_then(|column| self.field(column))
    }
}

pub struct CsvLoader;

impl CsvLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<CsvTable, IoError> {
        let file = File::open(path).map_err(|source| IoError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        CsvTable::from_reader(file).map_err(|source| IoError::Csv {
            path: path.to_path_buf(),
            source,
        })
    }
}
