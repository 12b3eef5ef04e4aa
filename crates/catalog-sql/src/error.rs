//! Error types for SQL emission and execution.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlError {
    /// Appending to the SQL output file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid JSON column value: {0}")]
    Json(#[from] serde_json::Error),

    /// A batch would exceed the protocol's bind parameter limit.
    #[error("{rows} rows need {params} parameters, limit is {limit}")]
    TooManyParameters {
        rows: usize,
        params: usize,
        limit: usize,
    },

    #[error("no transaction is open")]
    NoTransaction,

    #[error("a transaction is already open")]
    TransactionActive,
}

pub type Result<T> = std::result::Result<T, SqlError>;
