//! Run configuration for a product import.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field_map::FieldMap;

/// Default number of rows per INSERT statement.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Default target table.
pub const DEFAULT_TABLE: &str = "products";

/// Default file for emitted SQL.
pub const DEFAULT_OUTPUT_FILE: &str = "products_insert.sql";

/// How coerced rows leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Print a sample of each batch; write nothing.
    Preview,
    /// Append literal INSERT statements to the output file.
    FileEmit,
    /// Insert through one database transaction.
    Live,
}

impl RunMode {
    /// Resolves the mode from the test and emit-to-file switches.
    ///
    /// Test mode wins over file emission.
    pub fn from_flags(test: bool, emit_to_file: bool) -> Self {
        match (test, emit_to_file) {
            (true, _) => RunMode::Preview,
            (false, true) => RunMode::FileEmit,
            (false, false) => RunMode::Live,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Preview => "preview",
            RunMode::FileEmit => "file-emit",
            RunMode::Live => "live",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decimal mark convention for numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    /// Comma is the decimal mark when present, otherwise period.
    #[default]
    Auto,
    /// Comma decimal mark, period thousands separator (`1.234,56`).
    Comma,
    /// Period decimal mark; commas are invalid.
    Period,
}

/// What to do with numeric text that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Store NULL and record a warning.
    #[default]
    Lenient,
    /// Reject the row and fail the run.
    Strict,
}

/// Character encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputEncoding {
    #[default]
    Utf8,
    Windows1252,
}

/// Immutable settings for one import run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub input_path: PathBuf,
    /// Target of file-emit mode.
    pub output_path: PathBuf,
    /// Tenant identifier stamped on every row.
    pub merchant_id: String,
    pub field_map: FieldMap,
    pub batch_size: usize,
    pub table: String,
    pub decimal_separator: DecimalSeparator,
    pub numeric_policy: NumericPolicy,
    pub encoding: InputEncoding,
}

impl RunConfig {
    pub fn new(
        mode: RunMode,
        input_path: impl Into<PathBuf>,
        merchant_id: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            input_path: input_path.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            merchant_id: merchant_id.into(),
            field_map: FieldMap::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            table: DEFAULT_TABLE.to_string(),
            decimal_separator: DecimalSeparator::default(),
            numeric_policy: NumericPolicy::default(),
            encoding: InputEncoding::default(),
        }
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub fn with_decimal_separator(mut self, separator: DecimalSeparator) -> Self {
        self.decimal_separator = separator;
        self
    }

    #[must_use]
    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: InputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Checks the invariants every run relies on.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ModelError::InvalidBatchSize);
        }
        if self.merchant_id.trim().is_empty() {
            return Err(ModelError::EmptyMerchantId);
        }
        if !is_valid_table_name(&self.table) {
            return Err(ModelError::InvalidTableName(self.table.clone()));
        }
        Ok(())
    }
}

/// Accepts `name` or `schema.name` where each part is a plain identifier.
fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wins_over_file_emit() {
        assert_eq!(RunMode::from_flags(true, true), RunMode::Preview);
        assert_eq!(RunMode::from_flags(true, false), RunMode::Preview);
        assert_eq!(RunMode::from_flags(false, true), RunMode::FileEmit);
        assert_eq!(RunMode::from_flags(false, false), RunMode::Live);
    }

    #[test]
    fn defaults() {
        let config = RunConfig::new(RunMode::Live, "in.csv", "m-1");
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.table, "products");
        assert_eq!(config.decimal_separator, DecimalSeparator::Auto);
        assert_eq!(config.numeric_policy, NumericPolicy::Lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_batch_size() {
        let config = RunConfig::new(RunMode::Live, "in.csv", "m-1").with_batch_size(0);
        assert!(matches!(config.validate(), Err(ModelError::InvalidBatchSize)));
    }

    #[test]
    fn validate_rejects_blank_merchant() {
        let config = RunConfig::new(RunMode::Live, "in.csv", "  ");
        assert!(matches!(config.validate(), Err(ModelError::EmptyMerchantId)));
    }

    #[test]
    fn table_names() {
        assert!(is_valid_table_name("products"));
        assert!(is_valid_table_name("public.products"));
        assert!(is_valid_table_name("_tmp1"));
        assert!(!is_valid_table_name("1products"));
        assert!(!is_valid_table_name("products; DROP TABLE x"));
        assert!(!is_valid_table_name("a.b.c"));
        assert!(!is_valid_table_name(""));
    }
}
