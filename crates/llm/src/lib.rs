//! LLM integration for property estimates
//!
//! An OpenAI-compatible chat client, the analysis prompt, and the validator
//! that turns a model reply into an [`valora_core::EstimateContent`].

mod ai_types;
mod client;
mod error;
mod prompt;
mod validation;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod validation_tests;

pub use ai_types::{ChatRequest, Completion, Message, ResponseFormat, TokenUsage};
pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmClient, truncate};
pub use error::LlmError;
pub use prompt::{MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, build_analysis_prompt};
pub use validation::{
    DEFAULT_CONFIDENCE, DEFAULT_PROJECT_DESCRIPTION, DEFAULT_PROJECT_NAME,
    DEFAULT_RISK_ASSESSMENT, DEFAULT_TIMELINE, MAX_SERIES_VALUE, ValidatedEstimate,
    parse_estimate,
};
