//! CSV reading utilities.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{CSV_DELIMITER, CsvTable, parse_csv_text, read_csv_table};
