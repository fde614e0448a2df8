use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct HistoryItem {
    query: String,
    location: String,
    searched_at: DateTime<Utc>,
    results_count: usize,
    summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ClearedHistory {
    cleared: usize,
}

/// Lists this process's recorded searches, newest first.
pub(super) async fn list_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<Vec<HistoryItem>>> {
    let history = state.history.lock().await;
    let data = history
        .newest_first()
        .take(normalize_limit(query.limit))
        .map(|entry| HistoryItem {
            query: entry.query.clone(),
            location: entry.location.clone(),
            searched_at: entry.searched_at,
            results_count: entry.result.listings.len(),
            summary: entry.result.summary.clone(),
        })
        .collect();

    ApiResponse::json(req_id.0, data)
}

pub(super) async fn clear_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ClearedHistory>> {
    let mut history = state.history.lock().await;
    let cleared = history.len();
    history.clear();
    tracing::info!(cleared, "search history cleared");

    ApiResponse::json(req_id.0, ClearedHistory { cleared })
}
