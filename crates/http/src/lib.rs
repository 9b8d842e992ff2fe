//! HTTP front end for Valora Earth.
//!
//! Server-rendered questionnaire pages plus one JSON endpoint that triggers
//! estimate generation.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]

pub mod api_error;
mod forms;
mod handlers;
pub mod pages;
mod response_types;
mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use valora_service::{EstimateService, InquiryService};

pub use pages::Pages;

/// Shared application state for all HTTP handlers.
///
/// Services hold the connection pool and the AI client; there is no other
/// mutable state.
pub struct AppState {
    pub inquiry_service: Arc<InquiryService>,
    pub estimate_service: Arc<EstimateService>,
    pub pages: Pages,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::questionnaire::landing).post(handlers::questionnaire::submit_landing),
        )
        .route(
            "/estimate",
            get(handlers::questionnaire::restart).post(handlers::questionnaire::submit_step),
        )
        .route("/loading-estimate/{id}", get(handlers::results::loading))
        .route("/estimate-results/{id}", get(handlers::results::results))
        .route("/api/generate-estimate/{id}", post(handlers::estimates::generate_estimate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
