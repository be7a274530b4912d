//! Feedback endpoint handler.

use crate::api::{ApiError, AppState, FeedbackRequest, FeedbackResponse};
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /feedback - record an operator-corrected classification example.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(request) = payload?;

    if request.prompt.is_empty() {
        return Err(ApiError::validation("prompt must not be empty"));
    }

    state
        .engine
        .feedback(&request.prompt, request.correct_category)
        .await?;

    Ok(Json(FeedbackResponse {
        ok: true,
        message: format!(
            "example recorded for category '{}'",
            request.correct_category
        ),
    }))
}
