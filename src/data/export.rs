//! CSV Export Module
//! Serializes datasets back to CSV for download.

use crate::data::Dataset;
use crate::error::DataError;
use csv::{Terminator, WriterBuilder};
use std::path::Path;
use tracing::info;

pub const CSV_MIME: &str = "text/csv";

/// Downloadable CSV payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(dataset: &Dataset, file_name: impl Into<String>) -> Result<Self, DataError> {
        Ok(Self {
            file_name: file_name.into(),
            mime: CSV_MIME,
            bytes: to_csv_bytes(dataset)?,
        })
    }

    /// Write the payload to disk.
    pub fn write_to(&self, path: &Path) -> Result<(), DataError> {
        std::fs::write(path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "saved CSV export");
        Ok(())
    }
}

/// Header row then one line per row, `\n` terminated, quoted only where needed.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, DataError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(dataset.columns().iter().map(|c| c.name.as_str()))
        .map_err(csv_to_io)?;
    for row in dataset.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_field()))
            .map_err(csv_to_io)?;
    }

    writer
        .into_inner()
        .map_err(|e| DataError::Io(e.into_error()))
}

pub fn to_csv_string(dataset: &Dataset) -> Result<String, DataError> {
    let bytes = to_csv_bytes(dataset)?;
    String::from_utf8(bytes)
        .map_err(|e| DataError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn csv_to_io(err: csv::Error) -> DataError {
    DataError::Io(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataLoader, Value, ValueKind};

    #[test]
    fn writes_header_and_rows() {
        let ds = DataLoader::parse_csv("Date,Close,Note\n2025/08/01,81200.00,\"up, strongly\"\n").unwrap();
        let text = to_csv_string(&ds).unwrap();
        assert_eq!(text, "Date,Close,Note\n2025-08-01,81200.0,\"up, strongly\"\n");
    }

    #[test]
    fn missing_cells_are_empty_fields() {
        let ds = DataLoader::parse_csv("A,B\n1,\n2,3\n").unwrap();
        let ds = ds.with_column("SMA", ValueKind::Float, vec![Value::Missing, Value::Float(2.5)]);
        let text = to_csv_string(&ds).unwrap();
        assert_eq!(text, "A,B,SMA\n1,,\n2,3,2.5\n");
    }

    #[test]
    fn export_file_carries_mime_and_writes() {
        let ds = DataLoader::parse_csv("A\n1\n").unwrap();
        let export = ExportFile::new(&ds, "table_1.csv").unwrap();
        assert_eq!(export.mime, "text/csv");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&export.file_name);
        export.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "A\n1\n");
    }
}
