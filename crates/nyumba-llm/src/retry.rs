//! Which model API failures are worth another attempt.

use crate::error::LlmError;

/// Network failures, 429 and 5xx are transient; everything else is final.
pub(crate) fn is_retriable(err: &LlmError) -> bool {
    match err {
        LlmError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LlmError::Api { status, .. } => *status == 429 || *status >= 500,
        LlmError::Deserialize { .. }
        | LlmError::EmptyCompletion
        | LlmError::InvalidBaseUrl { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_retriable() {
        assert!(is_retriable(&LlmError::Api {
            status: 429,
            message: "slow down".to_owned(),
        }));
    }

    #[test]
    fn bad_request_is_not_retriable() {
        assert!(!is_retriable(&LlmError::Api {
            status: 400,
            message: "model not found".to_owned(),
        }));
    }

    #[test]
    fn empty_completion_is_not_retriable() {
        assert!(!is_retriable(&LlmError::EmptyCompletion));
    }

    #[tokio::test]
    async fn connect_error_is_retriable() {
        let err = reqwest::Client::new()
            .get("http://0.0.0.0:1")
            .send()
            .await
            .unwrap_err();
        assert!(is_retriable(&LlmError::Http(err)));
    }
}
