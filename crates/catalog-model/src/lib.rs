//! Data model for the product catalog importer.

pub mod error;
pub mod field;
pub mod field_map;
pub mod options;
pub mod record;
pub mod row;

pub use error::{ModelError, Result};
pub use field::{Column, ColumnKind, TargetField};
pub use field_map::FieldMap;
pub use options::{
    DEFAULT_BATCH_SIZE, DEFAULT_OUTPUT_FILE, DEFAULT_TABLE, DecimalSeparator, InputEncoding,
    NumericPolicy, RunConfig, RunMode,
};
pub use record::{MappedRecord, SourceRecord};
pub use row::{CanonicalRow, format_timestamp};
