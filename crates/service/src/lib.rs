//! Service layer for Valora Earth
//!
//! Centralizes business logic between HTTP/CLI handlers and storage/llm.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod error;
mod estimate_service;
mod inquiry_service;

pub use error::ServiceError;
pub use estimate_service::{API_KEY_NOT_CONFIGURED, EstimateService};
pub use inquiry_service::{InquiryResults, InquiryService};
