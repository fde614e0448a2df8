//! Caller-owned record of past searches.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::result::SearchResult;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub query: String,
    pub location: String,
    pub searched_at: DateTime<Utc>,
    pub result: SearchResult,
}

/// Append-only list of searches that produced listings.
///
/// Owned by whoever drives the searches (a CLI session, the server state) and
/// passed into the orchestrator explicitly.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `result` when it succeeded with at least one listing.
    ///
    /// Returns `true` if an entry was added.
    pub fn record(&mut self, query: &str, result: &SearchResult) -> bool {
        let Some(location) = result.location.as_deref() else {
            return false;
        };
        if !result.is_success() || result.listings.is_empty() {
            return false;
        }
        self.entries.push(HistoryEntry {
            query: query.to_string(),
            location: location.to_string(),
            searched_at: Utc::now(),
            result: result.clone(),
        });
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }
}
