//! Typed coercion of mapped product records.
//!
//! Every conversion is total: text that does not parse never panics. What
//! happens to unparseable numbers is decided once by
//! [`NumericPolicy`](catalog_model::NumericPolicy).

pub mod coerce;
pub mod error;
pub mod numeric;

pub use coerce::{
    CoercedRow, CoercedRows, CoercionWarning, LISTED_MARKER, RowStamp, coerce_record,
    coerce_records, coerce_records_with,
};
pub use error::{CoercionError, Result};
pub use numeric::{parse_f64, parse_i64};
