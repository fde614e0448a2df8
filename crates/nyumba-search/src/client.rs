//! HTTP client for SerpApi's `google_local` engine.
//!
//! Wraps `reqwest` with a request timeout, transient-error retry and shape
//! decoding. Callers get a flat list of [`RawListing`] records regardless of
//! which response shape the provider chose.

use std::time::Duration;

use nyumba_core::{retry_with_backoff, RetryPolicy};
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::retry::is_retriable;
use crate::types::{ProviderResponse, RawListing};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Fixed query text sent with every location search.
pub const SEARCH_QUERY: &str = "houses for sale";

/// SerpApi reports "no results" as an error object with HTTP 200.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Client for SerpApi property searches.
///
/// Use [`SerpApiClient::new`] for production or [`SerpApiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    result_limit: Option<u32>,
    retry: RetryPolicy,
}

impl SerpApiClient {
    /// Creates a client pointed at the production SerpApi endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SearchError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("nyumba/0.1 (property-search)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("search.json"))
            .map_err(|e| SearchError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            endpoint,
            result_limit: None,
            retry: RetryPolicy::new(1, 500),
        })
    }

    /// Caps the number of results requested (`num` parameter).
    #[must_use]
    pub fn with_result_limit(mut self, limit: Option<u32>) -> Self {
        self.result_limit = limit;
        self
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    /// Returns `true` when an API key is configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Searches for houses for sale around `location`.
    ///
    /// A provider "no results" answer is returned as an empty list.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::UnexpectedStatus`] on a non-2xx status.
    /// - [`SearchError::Provider`] when the body is an error object.
    /// - [`SearchError::Deserialize`] when the body matches no known shape.
    pub async fn search_listings(&self, location: &str) -> Result<Vec<RawListing>, SearchError> {
        let url = self.build_url(location);
        let body = retry_with_backoff(self.retry, "serpapi", is_retriable, || {
            let url = url.clone();
            async move { self.request_json(&url).await }
        })
        .await?;

        let response = ProviderResponse::decode(body).map_err(|e| SearchError::Deserialize {
            context: format!("google_local(location={location})"),
            source: e,
        })?;

        match response.into_records() {
            Ok(records) => {
                tracing::debug!(location, count = records.len(), "search provider returned records");
                Ok(records)
            }
            Err(message) if message.contains(NO_RESULTS_MARKER) => {
                tracing::debug!(location, "search provider reported no results");
                Ok(Vec::new())
            }
            Err(message) => Err(SearchError::Provider(message)),
        }
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, location: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", "google_local");
            pairs.append_pair("q", SEARCH_QUERY);
            pairs.append_pair("location", location);
            pairs.append_pair("hl", "en");
            if let Some(limit) = self.result_limit {
                pairs.append_pair("num", &limit.to_string());
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// Non-2xx responses become [`SearchError::UnexpectedStatus`] carrying the
    /// provider's `error` text when the body has one.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SearchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_owned());
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: self.endpoint.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SerpApiClient {
        SerpApiClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://serpapi.com");
        let url = client.build_url("Karen");
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search.json?engine=google_local&q=houses+for+sale&location=Karen&hl=en&api_key=test-key"
        );
    }

    #[test]
    fn build_url_adds_result_limit() {
        let client = test_client("https://serpapi.com/").with_result_limit(Some(6));
        let url = client.build_url("Runda");
        assert!(url.as_str().contains("&num=6&"), "missing num param: {url}");
    }

    #[test]
    fn build_url_encodes_location() {
        let client = test_client("https://serpapi.com");
        let url = client.build_url("Kilimani, Nairobi");
        assert!(
            url.as_str().contains("location=Kilimani%2C+Nairobi"),
            "location should be percent-encoded: {url}"
        );
    }

    #[test]
    fn has_credentials_rejects_blank_key() {
        let client = SerpApiClient::with_base_url("  ", 30, "https://serpapi.com").unwrap();
        assert!(!client.has_credentials());
        assert!(test_client("https://serpapi.com").has_credentials());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SerpApiClient::with_base_url("k", 30, "not a url");
        assert!(matches!(result, Err(SearchError::InvalidBaseUrl { .. })));
    }
}
