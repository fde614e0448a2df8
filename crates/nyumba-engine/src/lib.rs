//! Listing search pipeline: location resolution, ranking, summarization and
//! the orchestrator that ties them to the search and model providers.

pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod ranker;
pub mod resolver;
pub mod setup;

pub use error::{OrchestratorError, ValidationError};
pub use orchestrator::{SearchOrchestrator, NO_SUMMARY_PLACEHOLDER, UNRESOLVED_LOCATION_MESSAGE};
pub use provider::{CompletionModel, CompletionParams, ListingSource};
pub use ranker::{rank, recommendation_score, score_all, DEFAULT_TOP_N};
pub use resolver::{LocationResolver, LocationStrategy, DEFAULT_GAZETTEER};
pub use setup::{orchestrator_from_config, LiveOrchestrator};
