//! Batching and INSERT emission for canonical product rows.
//!
//! Rows are split by [`batches`] into contiguous slices; each slice becomes a
//! single multi-row INSERT, either parameterized for a [`BatchSink`] or with
//! escaped literals for an append-only SQL file.

pub mod batch;
pub mod error;
pub mod file;
pub mod quote;
pub mod sink;
pub mod statement;
pub mod value;

pub use batch::{Batch, Batches, batch_count, batches};
pub use error::{Result, SqlError};
pub use file::SqlFileWriter;
pub use quote::{escape_sql_string, qualified_table_name, quote_identifier, quote_literal};
pub use sink::{BatchSink, PostgresSink};
pub use statement::{
    InsertStatement, MAX_BIND_PARAMS, MAX_PARAMETERIZED_BATCH, column_list, literal_insert,
    parameterized_insert,
};
pub use value::{SqlValue, row_values};
