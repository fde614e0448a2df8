//! Which SerpApi failures are worth another attempt.
//!
//! Network failures, 429 and 5xx are transient. A bad key or a malformed body
//! will not improve on retry.

use crate::error::SearchError;

pub(crate) fn is_retriable(err: &SearchError) -> bool {
    match err {
        SearchError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SearchError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        SearchError::Provider(_)
        | SearchError::Deserialize { .. }
        | SearchError::InvalidBaseUrl { .. } => false,
    }
}
