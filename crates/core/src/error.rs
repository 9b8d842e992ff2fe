use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by domain validation.
#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, ValuationError>;
