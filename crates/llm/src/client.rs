use std::time::Duration;

use valora_core::{DEFAULT_LLM_TIMEOUT_SECS, env_non_empty, env_parse_with_default};

use crate::ai_types::{ChatRequest, ChatResponse, Completion};
use crate::error::LlmError;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
/// Default API origin; `/v1/chat/completions` is appended.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for an OpenAI-compatible chat completions API.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl LlmClient {
    /// Creates a client. The model comes from `VALORA_MODEL` and the request
    /// timeout from `VALORA_LLM_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let model = env_non_empty("VALORA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        let timeout_secs =
            env_parse_with_default("VALORA_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS);
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = build_http_client(Duration::from_secs(timeout_secs))?;
        Ok(Self { client, api_key, base_url, model })
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Replace the request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_http_client(timeout)?;
        Ok(self)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat completion request. There is no retry.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the response body cannot be parsed, the choices
    /// array is empty, or the first choice has no content.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<Completion, LlmError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::warn!(status = status.as_u16(), body = truncate(&body, 200), "AI API error");
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let ChatResponse { model, choices, usage } = chat_response;
        let first_choice = choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        let content = first_choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        let completion = Completion {
            content,
            model: model.unwrap_or_else(|| request.model.clone()),
            usage: usage.unwrap_or_default(),
            finish_reason: first_choice.finish_reason,
        };
        tracing::debug!(
            model = %completion.model,
            total_tokens = completion.usage.total_tokens,
            finish_reason = ?completion.finish_reason,
            "chat completion received"
        );
        Ok(completion)
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::ClientInit(e.to_string()))
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
