//! HTTP client for Groq chat completions.
//!
//! Groq exposes the OpenAI wire format under `/openai/v1`. The client holds
//! the API key, default model and retry policy; callers pass a prompt and
//! sampling options and get the completion text back.

use std::time::Duration;

use nyumba_core::{retry_with_backoff, RetryPolicy};
use reqwest::{Client, Url};

use crate::error::LlmError;
use crate::retry::is_retriable;
use crate::types::{ChatRequest, ChatResponse, ErrorEnvelope, Message};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/";
const DEFAULT_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

/// Client for Groq's chat-completions endpoint.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    retry: RetryPolicy,
}

impl GroqClient {
    /// Creates a client pointed at the production Groq API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`LlmError::InvalidBaseUrl`] if `base_url` is invalid.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("nyumba/0.1 (property-search)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("openai/v1/chat/completions"))
            .map_err(|e| LlmError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            endpoint,
            model: DEFAULT_MODEL.to_owned(),
            retry: RetryPolicy::new(1, 500),
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns `true` when an API key is configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Builds a request for the configured model from a system prompt
    /// (optional) and a user prompt.
    #[must_use]
    pub fn request(&self, system: Option<&str>, user: &str) -> ChatRequest {
        let mut request = ChatRequest::new(self.model.clone());
        if let Some(system) = system {
            request = request.message(Message::system(system));
        }
        request.message(Message::user(user))
    }

    /// Sends a chat completion and returns the trimmed text of the first choice.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] on network failure.
    /// - [`LlmError::Api`] on a non-2xx status.
    /// - [`LlmError::Deserialize`] if the body is not a completion response.
    /// - [`LlmError::EmptyCompletion`] if no choice carries text.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = retry_with_backoff(self.retry, "groq", is_retriable, || async {
            self.send(request).await
        })
        .await?;

        let content = response
            .first_content()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LlmError::EmptyCompletion)?;

        tracing::debug!(
            model = %request.model,
            chars = content.len(),
            "model completion received"
        );
        Ok(content.to_owned())
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_owned());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
            context: format!("chat completion (model={})", request.model),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_openai_path() {
        let client = GroqClient::with_base_url("k", 30, "https://api.groq.com").unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn request_includes_system_prompt_first() {
        let client = GroqClient::with_base_url("k", 30, "https://api.groq.com")
            .unwrap()
            .with_model("mistral-saba-24b");
        let request = client.request(Some("system text"), "user text");
        assert_eq!(request.model, "mistral-saba-24b");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "user text");
    }

    #[test]
    fn blank_key_has_no_credentials() {
        let client = GroqClient::with_base_url("", 30, "https://api.groq.com").unwrap();
        assert!(!client.has_credentials());
    }
}
