use async_trait::async_trait;
use valora_core::{AnalysisLog, Estimate, InquiryId, NewAnalysisLog, NewEstimate};

use crate::error::StorageError;

/// Persistence of generated estimates. One estimate per inquiry.
#[async_trait]
pub trait EstimateStore: Send + Sync {
    /// Insert an estimate.
    ///
    /// Fails with `Duplicate` when the inquiry already has one and with
    /// `OrphanedRecord` when the inquiry does not exist.
    async fn save_estimate(&self, estimate: &NewEstimate) -> Result<Estimate, StorageError>;

    /// Insert an estimate and its success log atomically.
    async fn save_estimate_with_log(
        &self,
        estimate: &NewEstimate,
        log: &NewAnalysisLog,
    ) -> Result<(Estimate, AnalysisLog), StorageError>;

    async fn get_estimate_for_inquiry(
        &self,
        inquiry_id: InquiryId,
    ) -> Result<Option<Estimate>, StorageError>;
}
