use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown target field: {0}")]
    UnknownField(String),
    #[error("target field '{field}' is mapped from both '{first}' and '{second}'")]
    DuplicateTarget {
        field: String,
        first: String,
        second: String,
    },
    #[error("field map is empty")]
    EmptyFieldMap,
    #[error("invalid field map: {0}")]
    FieldMapParse(#[from] serde_json::Error),
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
    #[error("merchant id must not be empty")]
    EmptyMerchantId,
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
