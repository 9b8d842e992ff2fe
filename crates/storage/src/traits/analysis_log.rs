use async_trait::async_trait;
use valora_core::{AnalysisLog, InquiryId, NewAnalysisLog};

use crate::error::StorageError;

/// Append-only audit trail of AI calls.
#[async_trait]
pub trait AnalysisLogStore: Send + Sync {
    async fn append_analysis_log(
        &self,
        log: &NewAnalysisLog,
    ) -> Result<AnalysisLog, StorageError>;

    /// Oldest first.
    async fn list_logs_for_inquiry(
        &self,
        inquiry_id: InquiryId,
    ) -> Result<Vec<AnalysisLog>, StorageError>;
}
