//! Typed API error for the JSON estimate endpoint.
//!
//! Every failure becomes `{"success": false, "error": "..."}`. Messages are
//! generic; the underlying error is only logged.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use valora_service::ServiceError;
use valora_storage::StorageError;

pub const INQUIRY_NOT_FOUND: &str = "Inquiry not found.";
pub const GENERATION_FAILED: &str = "We could not generate your estimate. Please try again.";
pub const SERVICE_UNAVAILABLE: &str = "The estimate service is not available right now.";
const INTERNAL_ERROR: &str = "An unexpected error occurred.";

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 404 Not Found: requested resource doesn't exist.
    NotFound(String),
    /// 502 Bad Gateway: the AI API failed or replied with garbage.
    BadGateway(String),
    /// 503 Service Unavailable: no AI client configured.
    ServiceUnavailable(String),
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_owned())
            },
        };
        let body = serde_json::json!({"success": false, "error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Storage(StorageError::NotFound { .. }) => {
                Self::NotFound(INQUIRY_NOT_FOUND.to_owned())
            },
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotConfigured(_) => {
                Self::ServiceUnavailable(SERVICE_UNAVAILABLE.to_owned())
            },
            ServiceError::Llm(e) => {
                tracing::warn!(error = %e, "estimate generation failed");
                Self::BadGateway(GENERATION_FAILED.to_owned())
            },
            _ => Self::Internal(err.into()),
        }
    }
}
