//! Product export ingestion.
//!
//! Loads the ERP's semicolon-delimited product export into [`SourceRecord`]s
//! keyed by the file's own header row. The file is drained completely before
//! any record is handed on.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use catalog_ingest::read_csv_table;
//! use catalog_model::InputEncoding;
//!
//! let table = read_csv_table(Path::new("produtos.csv"), InputEncoding::Utf8)?;
//! println!("{} records", table.len());
//! ```
//!
//! [`SourceRecord`]: catalog_model::SourceRecord

mod csv_table;
mod encoding;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{CSV_DELIMITER, CsvHeaders, CsvTable, parse_csv_text, read_csv_table};

// === Decoding ===
pub use encoding::{MAX_CSV_FILE_SIZE, check_file_size_with_limit, decode_bytes, read_text};
