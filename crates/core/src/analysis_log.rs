use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inquiry::InquiryId;

pub type AnalysisLogId = i64;

/// Audit record of one AI request/response pair. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisLog {
    pub id: AnalysisLogId,
    pub inquiry_id: InquiryId,
    pub request_data: serde_json::Value,
    pub response_data: serde_json::Value,
    pub model_used: String,
    pub tokens_used: u32,
    pub processing_time: f64,
    pub success: bool,
    pub error_message: String,
    pub created_at: DateTime<Utc>,
}

/// An analysis log entry waiting to be appended.
#[derive(Debug, Clone)]
pub struct NewAnalysisLog {
    pub inquiry_id: InquiryId,
    pub request_data: serde_json::Value,
    pub response_data: serde_json::Value,
    pub model_used: String,
    pub tokens_used: u32,
    pub processing_time: f64,
    pub success: bool,
    pub error_message: String,
}

impl NewAnalysisLog {
    #[must_use]
    pub fn succeeded(
        inquiry_id: InquiryId,
        request_data: serde_json::Value,
        response_data: serde_json::Value,
        model_used: String,
        tokens_used: u32,
        processing_time: f64,
    ) -> Self {
        Self {
            inquiry_id,
            request_data,
            response_data,
            model_used,
            tokens_used,
            processing_time,
            success: true,
            error_message: String::new(),
        }
    }

    #[must_use]
    pub fn failed(
        inquiry_id: InquiryId,
        request_data: serde_json::Value,
        response_data: serde_json::Value,
        model_used: String,
        tokens_used: u32,
        processing_time: f64,
        error_message: String,
    ) -> Self {
        Self {
            inquiry_id,
            request_data,
            response_data,
            model_used,
            tokens_used,
            processing_time,
            success: false,
            error_message,
        }
    }
}

impl AnalysisLog {
    #[must_use]
    pub fn from_new(id: AnalysisLogId, new: NewAnalysisLog, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            inquiry_id: new.inquiry_id,
            request_data: new.request_data,
            response_data: new.response_data,
            model_used: new.model_used,
            tokens_used: new.tokens_used,
            processing_time: new.processing_time,
            success: new.success,
            error_message: new.error_message,
            created_at,
        }
    }
}
