use nyumba_core::AppConfig;
use nyumba_llm::GroqClient;
use nyumba_search::SerpApiClient;

use crate::error::OrchestratorError;
use crate::orchestrator::SearchOrchestrator;

/// Orchestrator wired to the production providers.
pub type LiveOrchestrator = SearchOrchestrator<SerpApiClient, GroqClient>;

/// Builds the SerpApi and Groq clients from `config`.
///
/// Missing keys are not an error here; they surface as validation failures
/// on the first search.
///
/// # Errors
///
/// Returns [`OrchestratorError::SearchSetup`] or [`OrchestratorError::Model`]
/// if a client cannot be constructed or a base URL is invalid.
pub fn orchestrator_from_config(config: &AppConfig) -> Result<LiveOrchestrator, OrchestratorError> {
    let source = SerpApiClient::with_base_url(
        config.serp_api_key.as_deref().unwrap_or_default(),
        config.request_timeout_secs,
        &config.serp_base_url,
    )?
    .with_result_limit(config.serp_result_limit)
    .with_retry(config.max_retries, config.retry_backoff_base_ms);

    let model = GroqClient::with_base_url(
        config.groq_api_key.as_deref().unwrap_or_default(),
        config.request_timeout_secs,
        &config.groq_base_url,
    )?
    .with_model(config.groq_model.clone())
    .with_retry(config.max_retries, config.retry_backoff_base_ms);

    Ok(SearchOrchestrator::new(source, model).with_top_n(config.top_n))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use nyumba_core::build_app_config;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        build_app_config(|key| map.get(key).cloned().ok_or(std::env::VarError::NotPresent))
            .unwrap()
    }

    #[test]
    fn builds_without_keys() {
        let orchestrator = orchestrator_from_config(&config(&[])).unwrap();
        assert!(!orchestrator.source().has_credentials());
        assert!(!orchestrator.model().has_credentials());
        assert_eq!(orchestrator.top_n(), 3);
    }

    #[test]
    fn applies_model_and_top_n() {
        let orchestrator = orchestrator_from_config(&config(&[
            ("SERP_API_KEY", "serp"),
            ("GROQ_API_KEY", "groq"),
            ("GROQ_MODEL_NAME", "mistral-saba-24b"),
            ("NYUMBA_TOP_N", "5"),
        ]))
        .unwrap();
        assert!(orchestrator.source().has_credentials());
        assert_eq!(orchestrator.model().model(), "mistral-saba-24b");
        assert_eq!(orchestrator.top_n(), 5);
    }

    #[test]
    fn invalid_base_url_is_setup_error() {
        let err = orchestrator_from_config(&config(&[("NYUMBA_SERP_BASE_URL", "not a url")]))
            .err()
            .unwrap();
        assert!(matches!(err, OrchestratorError::SearchSetup(_)));
    }
}
