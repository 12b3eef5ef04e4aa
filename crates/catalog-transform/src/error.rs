use thiserror::Error;

use catalog_model::TargetField;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionError {
    #[error("line {line}: invalid number {value:?} for {field}")]
    InvalidNumber {
        line: u64,
        field: TargetField,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, CoercionError>;
