//! Semicolon-delimited CSV reading.

use std::path::Path;

use catalog_model::{InputEncoding, SourceRecord};

use crate::encoding::read_text;
use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Field separator of the product export.
pub const CSV_DELIMITER: u8 = b';';

/// A fully drained CSV export.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: CsvHeaders,
    pub records: Vec<SourceRecord>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        line: error.position().map_or(0, csv::Position::line),
        message: error.to_string(),
    }
}

/// Parses decoded CSV text. `path` is only used for diagnostics.
///
/// Rows may have fewer or more cells than the header; extra cells are
/// ignored and missing cells are absent from the record.
pub fn parse_csv_text(text: &str, path: &Path) -> Result<CsvTable> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header_record = reader.headers().map_err(|e| parse_error(path, &e))?;
    let headers = CsvHeaders::new(header_record.iter());
    if headers.is_blank() {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    for duplicate in headers.duplicates() {
        tracing::warn!(
            path = %path.display(),
            header = %duplicate,
            "duplicate CSV header, first occurrence wins"
        );
    }

    let shared = headers.shared();
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| parse_error(path, &e))?;
        let line = record.position().map_or(0, csv::Position::line);
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        records.push(SourceRecord::new(line, shared.clone(), values));
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        records = records.len(),
        "parsed CSV"
    );

    Ok(CsvTable { headers, records })
}

/// Reads and parses a CSV export from disk.
pub fn read_csv_table(path: &Path, encoding: InputEncoding) -> Result<CsvTable> {
    let text = read_text(path, encoding)?;
    parse_csv_text(&text, path)
}
