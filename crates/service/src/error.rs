//! Typed error enum for the service layer.
//!
//! Unifies validation, storage and LLM failures so the HTTP layer can pick a
//! status code without inspecting messages.

use thiserror::Error;
use valora_core::ValuationError;
use valora_llm::LlmError;
use valora_storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// AI API call or response validation failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No AI client is configured (missing API key).
    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<ValuationError> for ServiceError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::InvalidInput(msg) => Self::InvalidInput(msg),
            ValuationError::Serialization(e) => Self::Serialization(e),
        }
    }
}
