use crate::entities::batch_table::BatchTable;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct BatchQuery<'a> {
    pub path: &'a Path,
    pub text_column: &'a str,
    pub label_column: &'a str,
}

pub trait BatchReader {
    fn read_batch(&self, query: &BatchQuery<'_>) -> Result<BatchTable, String>;
}

pub trait BatchWriter {
    fn write_batch(&self, path: &Path, table: &BatchTable) -> Result<(), String>;
}
