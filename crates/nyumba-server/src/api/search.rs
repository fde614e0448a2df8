use axum::{extract::State, Extension, Json};
use nyumba_core::{google_maps_search_url, MapView, SearchResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    pub query: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    #[serde(flatten)]
    result: SearchResult,
    map: MapView,
    maps_url: Option<String>,
    /// Public id of the persisted search, when a database is configured.
    search_id: Option<Uuid>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Runs a search by explicit location, or by free text when no location is given.
pub(super) async fn run_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let query = non_blank(body.query.as_deref());
    let location = non_blank(body.location.as_deref());

    let (result, history_query) = match (location, query) {
        (Some(location), query) => (
            state
                .orchestrator
                .search_and_recommend(location, query)
                .await,
            query.unwrap_or(location).to_owned(),
        ),
        (None, Some(query)) => (state.orchestrator.search_text(query).await, query.to_owned()),
        (None, None) => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "either query or location is required",
            ));
        }
    };

    state.history.lock().await.record(&history_query, &result);
    let search_id = persist(&state, &history_query, &result).await;

    let map = MapView::from_listings(&result.listings);
    let maps_url = result.location.as_deref().map(google_maps_search_url);

    Ok(ApiResponse::json(
        req_id.0,
        SearchData {
            result,
            map,
            maps_url,
            search_id,
        },
    ))
}

/// Stores a successful search. Failures are logged and never fail the request.
async fn persist(state: &AppState, query: &str, result: &SearchResult) -> Option<Uuid> {
    let pool = state.pool.as_ref()?;
    let location = result.location.as_deref()?;
    if !result.is_success() || result.listings.is_empty() {
        return None;
    }
    match nyumba_db::record_search(pool, query, location, &result.listings).await {
        Ok(row) => Some(row.public_id),
        Err(e) => {
            tracing::warn!(location, error = %e, "failed to persist search");
            None
        }
    }
}
