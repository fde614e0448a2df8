use nyumba_llm::LlmError;
use nyumba_search::SearchError;
use thiserror::Error;

/// Request preconditions that must hold before any provider is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Location must be a non-empty string")]
    EmptyLocation,

    #[error("SERP_API_KEY environment variable not set")]
    MissingSearchCredentials,

    #[error("GROQ_API_KEY environment variable not set")]
    MissingModelCredentials,

    #[error("Question must be a non-empty string")]
    EmptyQuestion,
}

/// Errors from orchestrator operations that return `Result`.
///
/// Search operations never return this; they report through the envelope.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("model request failed: {0}")]
    Model(#[from] LlmError),

    #[error("search client setup failed: {0}")]
    SearchSetup(#[from] SearchError),
}
