use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use valora_core::{Estimate, Inquiry, InquiryId, NewAnalysisLog, NewEstimate};
use valora_llm::{DEFAULT_MODEL, LlmClient, parse_estimate};
use valora_storage::traits::{AnalysisLogStore, EstimateStore, InquiryStore};
use valora_storage::{SqliteStorage, StorageError};

use crate::error::ServiceError;

/// Error text recorded when generation is attempted without an API key.
pub const API_KEY_NOT_CONFIGURED: &str = "LLM API key not configured";

/// Runs one AI estimate per inquiry and keeps the audit log.
///
/// Every attempt that reaches the AI stage leaves exactly one analysis log:
/// a failed one on any error, or a successful one committed together with
/// the estimate.
pub struct EstimateService {
    storage: Arc<SqliteStorage>,
    llm: Option<Arc<LlmClient>>,
}

impl EstimateService {
    #[must_use]
    pub const fn new(storage: Arc<SqliteStorage>, llm: Option<Arc<LlmClient>>) -> Self {
        Self { storage, llm }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Generate (or return the existing) estimate for an inquiry.
    pub async fn generate(&self, inquiry_id: InquiryId) -> Result<Estimate, ServiceError> {
        let inquiry = self.storage.get_inquiry(inquiry_id).await?.ok_or_else(|| {
            StorageError::NotFound { entity: "inquiry", id: inquiry_id.to_string() }
        })?;

        if let Some(existing) = self.storage.get_estimate_for_inquiry(inquiry_id).await? {
            tracing::info!(inquiry_id, estimate_id = existing.id, "estimate exists, skipping AI call");
            return Ok(existing);
        }

        let Some(llm) = self.llm.as_deref() else {
            tracing::warn!(inquiry_id, "estimate requested but no API key is configured");
            let log = NewAnalysisLog::failed(
                inquiry_id,
                json!({ "inquiry": inquiry }),
                json!({}),
                DEFAULT_MODEL.to_owned(),
                0,
                0.0,
                API_KEY_NOT_CONFIGURED.to_owned(),
            );
            self.record_failure(&log).await;
            return Err(ServiceError::NotConfigured(API_KEY_NOT_CONFIGURED.to_owned()));
        };

        self.run_generation(llm, &inquiry).await
    }

    async fn run_generation(
        &self,
        llm: &LlmClient,
        inquiry: &Inquiry,
    ) -> Result<Estimate, ServiceError> {
        let inquiry_id = inquiry.id;
        let request = llm.build_estimate_request(&inquiry.to_input());
        let request_data = json!({ "inquiry": inquiry, "request": request });
        tracing::info!(inquiry_id, model = llm.model(), "requesting AI estimate");
        let started = Instant::now();

        let completion = match llm.chat_completion(&request).await {
            Ok(completion) => completion,
            Err(e) => {
                let elapsed = started.elapsed().as_secs_f64();
                tracing::error!(inquiry_id, elapsed, error = %e, "AI request failed");
                let log = NewAnalysisLog::failed(
                    inquiry_id,
                    request_data,
                    json!({}),
                    llm.model().to_owned(),
                    0,
                    elapsed,
                    e.to_string(),
                );
                self.record_failure(&log).await;
                return Err(e.into());
            },
        };
        let elapsed = started.elapsed().as_secs_f64();
        let response_data = serde_json::to_value(&completion)?;
        let tokens = completion.usage.total_tokens;

        let validated = match parse_estimate(&completion.content) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::error!(inquiry_id, elapsed, error = %e, "AI response rejected");
                let log = NewAnalysisLog::failed(
                    inquiry_id,
                    request_data,
                    response_data,
                    completion.model,
                    tokens,
                    elapsed,
                    e.to_string(),
                );
                self.record_failure(&log).await;
                return Err(e.into());
            },
        };

        let estimate = NewEstimate {
            inquiry_id,
            content: validated.content,
            ai_response_raw: response_data.clone(),
            processing_time: elapsed,
        };
        let log = NewAnalysisLog::succeeded(
            inquiry_id,
            request_data.clone(),
            response_data.clone(),
            completion.model.clone(),
            tokens,
            elapsed,
        );

        match self.storage.save_estimate_with_log(&estimate, &log).await {
            Ok((saved, _)) => {
                tracing::info!(
                    inquiry_id,
                    estimate_id = saved.id,
                    model = %completion.model,
                    tokens,
                    elapsed,
                    defaulted = validated.defaulted.len(),
                    "estimate generated"
                );
                Ok(saved)
            },
            Err(e) => {
                let message = format!("failed to store estimate: {e}");
                let err = ServiceError::from(e);
                if err.is_duplicate() {
                    // a concurrent request for the same inquiry committed first
                    if let Some(existing) =
                        self.storage.get_estimate_for_inquiry(inquiry_id).await?
                    {
                        tracing::info!(
                            inquiry_id,
                            estimate_id = existing.id,
                            "estimate already stored by a concurrent request"
                        );
                        return Ok(existing);
                    }
                }
                tracing::error!(inquiry_id, error = %err, "failed to store estimate");
                let log = NewAnalysisLog::failed(
                    inquiry_id,
                    request_data,
                    response_data,
                    completion.model,
                    tokens,
                    elapsed,
                    message,
                );
                self.record_failure(&log).await;
                Err(err)
            },
        }
    }

    /// Best-effort append; the caller is already returning an error.
    async fn record_failure(&self, log: &NewAnalysisLog) {
        if let Err(e) = self.storage.append_analysis_log(log).await {
            tracing::error!(inquiry_id = log.inquiry_id, error = %e, "failed to write analysis log");
        }
    }
}
