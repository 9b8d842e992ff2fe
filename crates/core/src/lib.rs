//! Core types for Valora Earth
//!
//! Domain types shared by the storage, LLM, service and HTTP crates.

mod analysis_log;
mod constants;
mod env_config;
mod error;
mod estimate;
mod inquiry;
mod json_utils;
mod questionnaire;

pub use analysis_log::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use estimate::*;
pub use inquiry::*;
pub use json_utils::*;
pub use questionnaire::*;
