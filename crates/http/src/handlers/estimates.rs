use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::api_error::{ApiError, INQUIRY_NOT_FOUND};
use crate::response_types::{EstimatePayload, GenerateEstimateResponse};

use super::parse_id;

/// Generate (or return the already stored) estimate for an inquiry.
pub async fn generate_estimate(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(|| ApiError::NotFound(INQUIRY_NOT_FOUND.to_owned()))?;
    let estimate = state.estimate_service.generate(id).await?;
    let body = GenerateEstimateResponse { success: true, estimate: EstimatePayload::from(&estimate) };
    let value = serde_json::to_value(&body).map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(value))
}
