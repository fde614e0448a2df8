use axum::{extract::State, Extension, Json};
use nyumba_engine::OrchestratorError;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    /// Summary text from an earlier search, used as grounding context.
    #[serde(default)]
    pub summary: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatReply {
    reply: String,
}

pub(super) async fn follow_up(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, ApiError> {
    match state
        .orchestrator
        .answer_follow_up(&body.summary, &body.message)
        .await
    {
        Ok(reply) => Ok(ApiResponse::json(req_id.0, ChatReply { reply })),
        Err(OrchestratorError::Validation(e)) => {
            Err(ApiError::new(req_id.0, "validation_error", e.to_string()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "follow-up answer failed");
            Err(ApiError::new(
                req_id.0,
                "upstream_error",
                "the language model could not answer right now",
            ))
        }
    }
}
