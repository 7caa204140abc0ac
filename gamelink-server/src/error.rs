//! API error responses for the write path.
//!
//! The read path never returns an error; it degrades to a zero badge.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers. Internal detail is logged at the call
/// site and never leaked through the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("conversationId is required")]
    MissingConversationId,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingConversationId => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
