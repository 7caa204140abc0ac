//! HTTP surface: the unread badge and mark-as-read.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::auth;
use crate::error::ApiError;
use crate::service;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub count: usize,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub ok: bool,
}

#[derive(Deserialize)]
pub struct MarkReadRequest {
    #[serde(rename = "conversationId", default)]
    pub conversation_id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/unread-count", get(unread_count))
        .route("/api/conversations/read", post(mark_read))
        .with_state(state)
}

/// Unread badge. Always 200: unauthenticated callers and backend trouble
/// both degrade to a zero count, never an error the UI would have to show.
async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<UnreadCountResponse> {
    let user_id = match auth::authenticate(state.sessions.as_ref(), &headers).await {
        Some(user_id) => user_id,
        None => return Json(UnreadCountResponse { count: 0 }),
    };

    let outcome = service::unread_outcome(&state, &user_id).await;
    Json(UnreadCountResponse {
        count: outcome.badge_value(),
    })
}

/// Marks a conversation read for the caller. Requires authentication and a
/// non-empty conversationId; storage detail on failure stays in the log.
async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let user_id = auth::authenticate(state.sessions.as_ref(), &headers)
        .await
        .ok_or(ApiError::Unauthorized)?;

    let conversation_id = payload.conversation_id.trim();
    if conversation_id.is_empty() {
        return Err(ApiError::MissingConversationId);
    }

    state
        .markers
        .mark_read(&user_id, conversation_id)
        .await
        .map_err(|e| {
            error!(
                user_id = %user_id,
                conversation_id = %conversation_id,
                error = %e,
                "Mark-as-read failed"
            );
            ApiError::Internal
        })?;

    Ok(Json(MarkReadResponse { ok: true }))
}
