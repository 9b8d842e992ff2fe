//! Storage trait abstraction.
//!
//! Services depend on these traits, so tests can swap the SQLite backend
//! for an in-memory database without touching business logic.

pub mod analysis_log;
pub mod estimate;
pub mod inquiry;

pub use analysis_log::AnalysisLogStore;
pub use estimate::EstimateStore;
pub use inquiry::InquiryStore;
