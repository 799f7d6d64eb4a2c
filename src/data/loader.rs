//! CSV Data Loader Module
//! Parses pasted or on-disk CSV text into a typed dataset.

use crate::data::{Dataset, NumberFormat};
use crate::error::DataError;
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::{debug, info};

/// Handles CSV ingestion. Comma-delimited, first line is the header.
pub struct DataLoader;

impl DataLoader {
    /// Parse CSV text into a dataset.
    pub fn parse_csv(text: &str) -> Result<Dataset, DataError> {
        if text.trim().is_empty() {
            return Err(DataError::Parse("input is empty".to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| DataError::Parse(format!("failed to read header row: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataError::Parse(e.to_string()))?;
            // Whitespace-only line; a single-column file keeps it as a missing value.
            if header.len() > 1 && record.len() == 1 && record[0].is_empty() {
                continue;
            }
            if record.len() != header.len() {
                let line = record
                    .position()
                    .map(|p| p.line().to_string())
                    .unwrap_or_else(|| "?".to_string());
                return Err(DataError::Parse(format!(
                    "line {} has {} fields, expected {}",
                    line,
                    record.len(),
                    header.len()
                )));
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(DataError::Parse("no data rows after the header".to_string()));
        }

        let dataset = Dataset::from_raw(header, rows, NumberFormat::PLAIN);
        debug!(
            kinds = ?dataset.columns().iter().map(|c| c.kind).collect::<Vec<_>>(),
            "inferred column kinds"
        );
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "parsed CSV text"
        );
        Ok(dataset)
    }

    /// Read a CSV file and parse it.
    pub fn load_csv(file_path: &Path) -> Result<Dataset, DataError> {
        let text = std::fs::read_to_string(file_path)?;
        info!(path = %file_path.display(), bytes = text.len(), "read CSV file");
        Self::parse_csv(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Value, ValueKind};

    const SAMPLE: &str = "Date,Open,High,Low,Close\n\
        2025-08-01,81018.72,81500.00,80800.00,81200.00\n\
        2025-08-02,81200.00,81800.00,81100.00,81750.00\n\
        2025-08-03,81750.00,82000.00,81500.00,81900.00\n";

    #[test]
    fn parses_sample_ohlc() {
        let ds = DataLoader::parse_csv(SAMPLE).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column_names(), vec!["Date", "Open", "High", "Low", "Close"]);
        assert_eq!(ds.columns()[0].kind, ValueKind::Date);
        assert_eq!(ds.columns()[4].kind, ValueKind::Float);
        assert_eq!(ds.rows()[0][4], Value::Float(81200.0));
    }

    #[test]
    fn field_count_mismatch_is_parse_error() {
        let err = DataLoader::parse_csv("A,B\n1,2,3").unwrap_err();
        match err {
            DataError::Parse(msg) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_and_header_only_are_parse_errors() {
        assert!(matches!(DataLoader::parse_csv(""), Err(DataError::Parse(_))));
        assert!(matches!(DataLoader::parse_csv("  \n "), Err(DataError::Parse(_))));
        assert!(matches!(DataLoader::parse_csv("A,B\n"), Err(DataError::Parse(_))));
    }

    #[test]
    fn blank_lines_and_quoted_commas() {
        let ds = DataLoader::parse_csv("Name,Qty\n\n\"Smith, J\",3\n\nLee,4\n").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows()[0][0], Value::Text("Smith, J".to_string()));
        assert_eq!(ds.columns()[1].kind, ValueKind::Integer);
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let ds = DataLoader::parse_csv("A,B\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows()[1], vec![Value::Integer(3), Value::Integer(4)]);

        let ds = DataLoader::parse_csv("A,B\n1,2\n,\n").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows()[1], vec![Value::Missing, Value::Missing]);
    }

    #[test]
    fn single_column_keeps_whitespace_cell_as_missing() {
        let ds = DataLoader::parse_csv("A\n1\n   \n3\n").unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.rows()[1][0], Value::Missing);
    }

    #[test]
    fn duplicate_headers_are_renamed() {
        let ds = DataLoader::parse_csv("Close,Close\n1,2\n").unwrap();
        assert_eq!(ds.column_names(), vec!["Close", "Close.1"]);
    }

    #[test]
    fn load_csv_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, SAMPLE.as_bytes()).unwrap();
        let ds = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    fn load_csv_missing_file_is_io_error() {
        let err = DataLoader::load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
