//! Domain types and configuration shared by every NyumbaAI crate.

pub mod app_config;
pub mod config;
pub mod history;
pub mod listing;
pub mod location;
pub mod map;
pub mod result;
pub mod retry;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use history::{HistoryEntry, SearchHistory};
pub use listing::{
    CanonicalListing, Coordinates, DEFAULT_ADDRESS, DEFAULT_CONTACT, DEFAULT_HOURS, DEFAULT_LINK,
    DEFAULT_NAME, DEFAULT_PRICE, DEFAULT_PROPERTY_TYPE,
};
pub use location::{ResolutionMethod, ResolvedLocation};
pub use map::{google_maps_search_url, MapMarker, MapView, DEFAULT_MAP_CENTER};
pub use result::{FailureKind, Recommendation, RecommendationSet, SearchResult, SearchStatus};
pub use retry::{retry_with_backoff, RetryPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
