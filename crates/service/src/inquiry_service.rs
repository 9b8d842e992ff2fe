use std::sync::Arc;

use serde::Serialize;
use valora_core::{AnalysisLog, Estimate, Inquiry, InquiryId, InquiryInput, MAX_QUERY_LIMIT};
use valora_storage::SqliteStorage;
use valora_storage::traits::{AnalysisLogStore, EstimateStore, InquiryStore};

use crate::error::ServiceError;

/// An inquiry together with its estimate, if one has been generated.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryResults {
    pub inquiry: Inquiry,
    pub estimate: Option<Estimate>,
}

pub struct InquiryService {
    storage: Arc<SqliteStorage>,
}

impl InquiryService {
    #[must_use]
    pub const fn new(storage: Arc<SqliteStorage>) -> Self {
        Self { storage }
    }

    /// Validate and persist a completed questionnaire.
    pub async fn submit(&self, input: InquiryInput) -> Result<Inquiry, ServiceError> {
        input.validate()?;
        let inquiry = self.storage.create_inquiry(&input).await?;
        tracing::info!(
            inquiry_id = inquiry.id,
            region = %inquiry.region,
            lot_size_acres = inquiry.lot_size_acres(),
            "inquiry submitted"
        );
        Ok(inquiry)
    }

    pub async fn get(&self, id: InquiryId) -> Result<Option<Inquiry>, ServiceError> {
        Ok(self.storage.get_inquiry(id).await?)
    }

    /// Newest first; `limit` is capped at `MAX_QUERY_LIMIT`.
    pub async fn list(&self, limit: usize) -> Result<Vec<Inquiry>, ServiceError> {
        Ok(self.storage.list_inquiries(limit.min(MAX_QUERY_LIMIT)).await?)
    }

    pub async fn results(&self, id: InquiryId) -> Result<Option<InquiryResults>, ServiceError> {
        let Some(inquiry) = self.storage.get_inquiry(id).await? else {
            return Ok(None);
        };
        let estimate = self.storage.get_estimate_for_inquiry(id).await?;
        Ok(Some(InquiryResults { inquiry, estimate }))
    }

    pub async fn logs(&self, id: InquiryId) -> Result<Vec<AnalysisLog>, ServiceError> {
        Ok(self.storage.list_logs_for_inquiry(id).await?)
    }

    /// Delete an inquiry; its estimate and logs go with it.
    pub async fn delete(&self, id: InquiryId) -> Result<bool, ServiceError> {
        Ok(self.storage.delete_inquiry(id).await?)
    }
}
