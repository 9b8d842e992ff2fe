//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from the AI API call and from validating its reply.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices returned")]
    EmptyResponse,
    #[error("empty response: message content is blank")]
    EmptyContent,
    #[error("malformed estimate: {0}")]
    MalformedEstimate(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl LlmError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::HttpRequest(e) if e.is_timeout())
    }
}
