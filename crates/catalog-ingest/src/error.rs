//! Error types for product export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a CSV export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Encoding Errors ===
    /// File uses an encoding that cannot be read.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Bytes are not valid in the configured encoding.
    #[error("{path} is not valid {encoding}; try --encoding windows-1252")]
    InvalidEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse a CSV line.
    #[error("failed to parse CSV {path} at line {line}: {message}")]
    CsvParse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row has no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn test_parse_error_display_has_line() {
        let err = IngestError::CsvParse {
            path: PathBuf::from("produtos.csv"),
            line: 7,
            message: "unterminated quote".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse CSV produtos.csv at line 7: unterminated quote"
        );
    }
}
