//! Pipeline Error Module
//! Failure categories surfaced to the user at the action boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to parse CSV: {0}")]
    Parse(String),
    #[error("Failed to fetch document: {0}")]
    Fetch(String),
    #[error("No parseable HTML table: {0}")]
    Extraction(String),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
    #[error("Column '{column}' is {kind}, not numeric")]
    NonNumericColumn { column: String, kind: String },
    #[error("Moving average window must be at least 1")]
    InvalidWindow,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Remediation hint shown next to the error message.
    pub fn hint(&self) -> &'static str {
        match self {
            DataError::Parse(_) => {
                "Please ensure your data is comma-separated with a header row and the same number of fields on every line."
            }
            DataError::Fetch(_) => {
                "Check the URL and your network connection, then try again."
            }
            DataError::Extraction(_) => {
                "The page has table markup but no usable rows. Data rendered by JavaScript charts cannot be extracted."
            }
            DataError::MissingColumn(_) => {
                "Trend analysis needs a closing price column. Rename or add it and try again."
            }
            DataError::NonNumericColumn { .. } => {
                "Make sure every value in the closing price column is a number."
            }
            DataError::InvalidWindow => "Set the analysis window to a positive number of rows.",
            DataError::Io(_) => "Check that the file exists and is readable.",
        }
    }

    /// Message plus hint, ready for display.
    pub fn user_message(&self) -> String {
        format!("{} {}", self, self.hint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_hint() {
        let err = DataError::Parse("line 2 has 3 fields, expected 2".to_string());
        let msg = err.user_message();
        assert!(msg.starts_with("Failed to parse CSV: line 2"));
        assert!(msg.contains("header row"));
    }

    #[test]
    fn non_numeric_names_column_and_kind() {
        let err = DataError::NonNumericColumn {
            column: "Close".to_string(),
            kind: "text".to_string(),
        };
        assert_eq!(err.to_string(), "Column 'Close' is text, not numeric");
    }
}
