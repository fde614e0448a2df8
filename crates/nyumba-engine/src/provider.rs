//! Collaborator seams: the search provider and the language model.
//!
//! The orchestrator only talks to these traits; the SerpApi and Groq clients
//! implement them here, and tests substitute in-memory fakes.

use async_trait::async_trait;
use nyumba_llm::{GroqClient, LlmError};
use nyumba_search::{RawListing, SearchError, SerpApiClient};

/// Something that can return raw listing records for a location.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Returns `true` when the provider key is configured.
    fn has_credentials(&self) -> bool;

    async fn search(&self, location: &str) -> Result<Vec<RawListing>, SearchError>;
}

/// Sampling options for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionParams {
    /// Short, near-deterministic output for location extraction.
    pub const EXTRACTION: Self = Self {
        temperature: 0.1,
        max_tokens: Some(50),
    };

    /// Longer conversational output for listing summaries.
    pub const SUMMARY: Self = Self {
        temperature: 0.3,
        max_tokens: Some(1500),
    };

    pub const FOLLOW_UP: Self = Self {
        temperature: 0.3,
        max_tokens: None,
    };
}

/// A language model that turns a prompt into free text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Returns `true` when the provider key is configured.
    fn has_credentials(&self) -> bool;

    async fn complete(
        &self,
        system: Option<&str>,
        prompt: &str,
        params: CompletionParams,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl ListingSource for SerpApiClient {
    fn has_credentials(&self) -> bool {
        SerpApiClient::has_credentials(self)
    }

    async fn search(&self, location: &str) -> Result<Vec<RawListing>, SearchError> {
        self.search_listings(location).await
    }
}

#[async_trait]
impl CompletionModel for GroqClient {
    fn has_credentials(&self) -> bool {
        GroqClient::has_credentials(self)
    }

    async fn complete(
        &self,
        system: Option<&str>,
        prompt: &str,
        params: CompletionParams,
    ) -> Result<String, LlmError> {
        let mut request = self.request(system, prompt).temperature(params.temperature);
        if let Some(max_tokens) = params.max_tokens {
            request = request.max_tokens(max_tokens);
        }
        self.chat_completion(&request).await
    }
}
