//! Loading and results pages.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use crate::AppState;
use crate::pages::{self, PageError};
use crate::views::{EstimateView, LoadingView, ResultsView};

use super::parse_id;

pub async fn loading(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(inquiry) = state.inquiry_service.get(id).await? else {
        tracing::debug!(inquiry_id = id, "loading page for unknown inquiry");
        return Ok(Redirect::to("/").into_response());
    };
    let view = LoadingView { inquiry_id: inquiry.id, region: &inquiry.region };
    Ok(state.pages.render(pages::LOADING, &view)?.into_response())
}

pub async fn results(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(found) = state.inquiry_service.results(id).await? else {
        tracing::debug!(inquiry_id = id, "results page for unknown inquiry");
        return Ok(Redirect::to("/").into_response());
    };
    let view = ResultsView {
        inquiry: &found.inquiry,
        estimate: found.estimate.as_ref().map(EstimateView::new),
    };
    Ok(state.pages.render(pages::RESULTS, &view)?.into_response())
}
