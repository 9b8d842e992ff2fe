use async_trait::async_trait;
use valora_core::{Inquiry, InquiryId, InquiryInput};

use crate::error::StorageError;

/// Persistence of submitted inquiries.
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Insert a new inquiry and return it with its assigned id.
    async fn create_inquiry(&self, input: &InquiryInput) -> Result<Inquiry, StorageError>;

    async fn get_inquiry(&self, id: InquiryId) -> Result<Option<Inquiry>, StorageError>;

    /// Newest first.
    async fn list_inquiries(&self, limit: usize) -> Result<Vec<Inquiry>, StorageError>;

    async fn count_inquiries(&self) -> Result<u64, StorageError>;

    /// Delete an inquiry together with its estimate and logs.
    /// Returns `true` if a row was deleted.
    async fn delete_inquiry(&self, id: InquiryId) -> Result<bool, StorageError>;
}
