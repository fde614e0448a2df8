//! Free-text location resolution.
//!
//! Strategies run in order and the first one that yields a location wins.
//! The default chain is gazetteer lookup, then the `in <place>[, <region>]`
//! phrase, then the language model when one is configured.

use std::sync::LazyLock;

use nyumba_core::{ResolutionMethod, ResolvedLocation};
use regex::Regex;

use crate::prompt::{location_prompt, parse_location_reply};
use crate::provider::{CompletionModel, CompletionParams};

/// Known place names. Sub-areas precede the cities that contain them so
/// "Westlands, Nairobi" resolves to the more specific place.
pub const DEFAULT_GAZETTEER: &[&str] = &[
    "Westlands",
    "Karen",
    "Kilimani",
    "Runda",
    "Kileleshwa",
    "Lavington",
    "Muthaiga",
    "Nyali",
    "South B",
    "South C",
    "Nairobi",
    "Mombasa",
    "Kisumu",
    "Nakuru",
    "Eldoret",
    "Nyeri",
    "Machakos",
    "Malindi",
    "Kitui",
    "Garissa",
];

static LOCATION_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bin\s+([a-z0-9\s]+)(?:,\s*([a-z\s]+))?").expect("valid regex")
});

/// One step of the resolution chain.
#[derive(Debug, Clone)]
pub enum LocationStrategy {
    /// Case-insensitive substring match; earlier entries win.
    Gazetteer(Vec<String>),
    /// First match of a phrase regex. Group 1 is the place and the optional
    /// group 2 a qualifier appended as `"place, qualifier"`.
    Pattern(Regex),
    /// Constrained extraction prompt. Skipped when no model is configured.
    Model,
}

impl LocationStrategy {
    #[must_use]
    pub fn default_gazetteer() -> Self {
        Self::Gazetteer(DEFAULT_GAZETTEER.iter().map(|s| (*s).to_owned()).collect())
    }

    #[must_use]
    pub fn default_pattern() -> Self {
        Self::Pattern(LOCATION_PHRASE_RE.clone())
    }

    fn method(&self) -> ResolutionMethod {
        match self {
            Self::Gazetteer(_) => ResolutionMethod::Gazetteer,
            Self::Pattern(_) => ResolutionMethod::Pattern,
            Self::Model => ResolutionMethod::Model,
        }
    }
}

/// Ordered chain of [`LocationStrategy`] values.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    strategies: Vec<LocationStrategy>,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self {
            strategies: vec![
                LocationStrategy::default_gazetteer(),
                LocationStrategy::default_pattern(),
                LocationStrategy::Model,
            ],
        }
    }
}

impl LocationResolver {
    #[must_use]
    pub fn new(strategies: Vec<LocationStrategy>) -> Self {
        Self { strategies }
    }

    /// Replaces every gazetteer strategy's entries with `entries`.
    #[must_use]
    pub fn with_gazetteer<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        for strategy in &mut self.strategies {
            if let LocationStrategy::Gazetteer(list) = strategy {
                list.clone_from(&entries);
            }
        }
        self
    }

    #[must_use]
    pub fn strategies(&self) -> &[LocationStrategy] {
        &self.strategies
    }

    /// Resolves `text` to a location, or [`ResolvedLocation::none`].
    ///
    /// `model` is consulted only by a [`LocationStrategy::Model`] step and only
    /// when it reports credentials. Model failures count as no result.
    pub async fn resolve(
        &self,
        text: &str,
        model: Option<&dyn CompletionModel>,
    ) -> ResolvedLocation {
        for strategy in &self.strategies {
            let found = match strategy {
                LocationStrategy::Gazetteer(entries) => match_gazetteer(entries, text),
                LocationStrategy::Pattern(re) => match_pattern(re, text),
                LocationStrategy::Model => match model.filter(|m| m.has_credentials()) {
                    Some(model) => ask_model(model, text).await,
                    None => None,
                },
            };
            if let Some(location) = found {
                tracing::debug!(method = %strategy.method(), %location, "location resolved");
                return ResolvedLocation::found(location, strategy.method());
            }
        }
        ResolvedLocation::none()
    }
}

fn match_gazetteer(entries: &[String], text: &str) -> Option<String> {
    let haystack = text.to_lowercase();
    entries
        .iter()
        .find(|entry| !entry.is_empty() && haystack.contains(&entry.to_lowercase()))
        .cloned()
}

fn match_pattern(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text).find_map(|caps| {
        let place = caps.get(1)?.as_str().trim();
        if place.is_empty() {
            return None;
        }
        let qualifier = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|q| !q.is_empty());
        Some(match qualifier {
            Some(q) => format!("{place}, {q}"),
            None => place.to_owned(),
        })
    })
}

async fn ask_model(model: &dyn CompletionModel, text: &str) -> Option<String> {
    match model
        .complete(None, &location_prompt(text), CompletionParams::EXTRACTION)
        .await
    {
        Ok(reply) => parse_location_reply(&reply),
        Err(e) => {
            tracing::warn!(error = %e, "model location extraction failed");
            None
        }
    }
}
