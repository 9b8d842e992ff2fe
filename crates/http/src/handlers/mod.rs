#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod estimates;
pub mod questionnaire;
pub mod results;

use valora_core::InquiryId;

/// Path ids arrive as text so that garbage gets the same treatment as an unknown id.
fn parse_id(raw: &str) -> Option<InquiryId> {
    raw.trim().parse().ok().filter(|id: &InquiryId| *id > 0)
}
