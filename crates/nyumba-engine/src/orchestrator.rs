//! End-to-end search: validate, fetch, normalize, rank, summarize.
//!
//! Search operations always produce a [`SearchResult`]; provider failures
//! degrade the envelope instead of surfacing as `Err`.

use nyumba_core::{FailureKind, ResolvedLocation, SearchHistory, SearchResult};
use nyumba_search::normalize_listings;

use crate::error::{OrchestratorError, ValidationError};
use crate::prompt::{follow_up_system_prompt, summary_prompt};
use crate::provider::{CompletionModel, CompletionParams, ListingSource};
use crate::ranker::{rank, score_all, DEFAULT_TOP_N};
use crate::resolver::LocationResolver;

/// Summary text used when the model cannot produce one.
pub const NO_SUMMARY_PLACEHOLDER: &str =
    "I couldn't generate a response. Please check the property details directly.";

pub const UNRESOLVED_LOCATION_MESSAGE: &str =
    "Could not identify a location in your query. Please specify a location in Kenya.";

/// Coordinates one search provider and one language model.
pub struct SearchOrchestrator<S, M> {
    source: S,
    model: M,
    resolver: LocationResolver,
    top_n: usize,
}

impl<S, M> SearchOrchestrator<S, M>
where
    S: ListingSource,
    M: CompletionModel,
{
    #[must_use]
    pub fn new(source: S, model: M) -> Self {
        Self {
            source,
            model,
            resolver: LocationResolver::default(),
            top_n: DEFAULT_TOP_N,
        }
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: LocationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    fn validate_credentials(&self) -> Result<(), ValidationError> {
        if !self.source.has_credentials() {
            return Err(ValidationError::MissingSearchCredentials);
        }
        if !self.model.has_credentials() {
            return Err(ValidationError::MissingModelCredentials);
        }
        Ok(())
    }

    /// Checks every precondition of a search without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the first failed [`ValidationError`], checking the location
    /// first and then the search and model credentials.
    pub fn validate(&self, location: &str) -> Result<(), ValidationError> {
        if location.trim().is_empty() {
            return Err(ValidationError::EmptyLocation);
        }
        self.validate_credentials()
    }

    /// Resolves a location from free text using the configured strategies.
    pub async fn resolve_location(&self, text: &str) -> ResolvedLocation {
        self.resolver
            .resolve(text, Some(&self.model as &dyn CompletionModel))
            .await
    }

    /// Searches `location` and returns ranked listings with a summary.
    pub async fn search_and_recommend(
        &self,
        location: &str,
        user_query: Option<&str>,
    ) -> SearchResult {
        if let Err(e) = self.validate(location) {
            tracing::warn!(error = %e, "search rejected");
            return SearchResult::error(FailureKind::Validation, e.to_string());
        }
        let location = location.trim();

        tracing::info!(location, "searching listings");
        let records = match self.source.search(location).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(location, error = %e, "listing search failed");
                return SearchResult::empty(
                    location,
                    format!("Could not reach the search service for {location}"),
                )
                .with_failure(FailureKind::ProviderUnavailable);
            }
        };

        if records.is_empty() {
            tracing::info!(location, "no listings found");
            return SearchResult::empty(location, format!("No properties found in {location}"));
        }

        let mut listings = normalize_listings(&records);
        score_all(&mut listings);
        let recommendations = rank(&listings, self.top_n);

        let summary = match self
            .model
            .complete(
                None,
                &summary_prompt(&listings, user_query),
                CompletionParams::SUMMARY,
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(location, error = %e, "summary generation failed");
                NO_SUMMARY_PLACEHOLDER.to_owned()
            }
        };

        tracing::info!(
            location,
            listings = listings.len(),
            recommended = recommendations.len(),
            "search complete"
        );
        SearchResult::found(location, listings, recommendations, summary)
    }

    /// Resolves a location from `text`, then searches it with `text` as the
    /// user query.
    pub async fn search_text(&self, text: &str) -> SearchResult {
        if let Err(e) = self.validate_credentials() {
            tracing::warn!(error = %e, "search rejected");
            return SearchResult::error(FailureKind::Validation, e.to_string());
        }

        let resolved = self.resolve_location(text).await;
        let method = resolved.method;
        let Some(location) = resolved.location else {
            tracing::info!(query = text, "no location in query");
            return SearchResult::error(FailureKind::Resolution, UNRESOLVED_LOCATION_MESSAGE);
        };

        self.search_and_recommend(&location, Some(text))
            .await
            .with_resolution(method)
    }

    /// [`Self::search_text`], then records the result in `history`.
    pub async fn search_text_recorded(
        &self,
        text: &str,
        history: &mut SearchHistory,
    ) -> SearchResult {
        let result = self.search_text(text).await;
        if history.record(text, &result) {
            tracing::debug!(entries = history.len(), "search recorded in history");
        }
        result
    }

    /// Answers a follow-up question about an earlier summary.
    ///
    /// # Errors
    ///
    /// - [`OrchestratorError::Validation`] if the question is blank or the
    ///   model key is missing.
    /// - [`OrchestratorError::Model`] if the completion fails.
    pub async fn answer_follow_up(
        &self,
        summary: &str,
        question: &str,
    ) -> Result<String, OrchestratorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }
        if !self.model.has_credentials() {
            return Err(ValidationError::MissingModelCredentials.into());
        }

        let system = follow_up_system_prompt(summary);
        let answer = self
            .model
            .complete(Some(&system), question, CompletionParams::FOLLOW_UP)
            .await?;
        Ok(answer)
    }
}
