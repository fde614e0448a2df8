//! The status-tagged envelope returned by every search operation.

use serde::Serialize;

use crate::listing::CanonicalListing;
use crate::location::ResolutionMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Success,
    Error,
}

/// Why a search failed or degraded.
///
/// `Validation` and `Resolution` accompany [`SearchStatus::Error`];
/// `ProviderUnavailable` accompanies a successful but empty search whose
/// provider could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Resolution,
    ProviderUnavailable,
}

/// One ranked entry, pointing into the listings of the same search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub listing_index: usize,
    pub score: f64,
}

/// Ranked top-N view over a listing slice, highest score first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet {
    entries: Vec<Recommendation>,
}

impl RecommendationSet {
    #[must_use]
    pub fn new(entries: Vec<Recommendation>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Recommendation] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Yields the recommended listings in rank order.
    ///
    /// Entries whose index is out of range for `listings` are skipped.
    pub fn resolve<'a>(
        &'a self,
        listings: &'a [CanonicalListing],
    ) -> impl Iterator<Item = &'a CanonicalListing> + 'a {
        self.entries
            .iter()
            .filter_map(|entry| listings.get(entry.listing_index))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub status: SearchStatus,
    pub location: Option<String>,
    pub resolution: Option<ResolutionMethod>,
    pub listings: Vec<CanonicalListing>,
    pub recommendations: RecommendationSet,
    pub summary: Option<String>,
    /// Informational, non-error text such as "No properties found in Karen".
    pub message: Option<String>,
    pub error_message: Option<String>,
    pub failure: Option<FailureKind>,
}

impl SearchResult {
    /// An error envelope carrying no listings.
    #[must_use]
    pub fn error(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: SearchStatus::Error,
            location: None,
            resolution: None,
            listings: Vec::new(),
            recommendations: RecommendationSet::default(),
            summary: None,
            message: None,
            error_message: Some(message.into()),
            failure: Some(kind),
        }
    }

    /// A successful envelope with no listings.
    #[must_use]
    pub fn empty(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: SearchStatus::Success,
            location: Some(location.into()),
            resolution: None,
            listings: Vec::new(),
            recommendations: RecommendationSet::default(),
            summary: None,
            message: Some(message.into()),
            error_message: None,
            failure: None,
        }
    }

    /// A successful envelope with listings, their ranking and a summary.
    #[must_use]
    pub fn found(
        location: impl Into<String>,
        listings: Vec<CanonicalListing>,
        recommendations: RecommendationSet,
        summary: String,
    ) -> Self {
        Self {
            status: SearchStatus::Success,
            location: Some(location.into()),
            resolution: None,
            listings,
            recommendations,
            summary: Some(summary),
            message: None,
            error_message: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn with_resolution(mut self, method: ResolutionMethod) -> Self {
        self.resolution = Some(method);
        self
    }

    #[must_use]
    pub fn with_failure(mut self, kind: FailureKind) -> Self {
        self.failure = Some(kind);
        self
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }

    /// Recommended listings in rank order.
    pub fn recommended(&self) -> impl Iterator<Item = &CanonicalListing> {
        self.recommendations.resolve(&self.listings)
    }

    /// The text a user should see when the search produced nothing to show.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        self.error_message.as_deref().or(self.message.as_deref())
    }
}
