//! Completion endpoint handler.

use crate::api::{ApiError, AppState, CompleteRequest};
use crate::router::LlmResponse;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

/// POST /complete - classify the prompt, route it, return the answer.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Result<Json<LlmResponse>, ApiError> {
    let Json(request) = payload?;

    if request.prompt.is_empty() {
        return Err(ApiError::validation("prompt must not be empty"));
    }

    let options = request.options.unwrap_or_default();

    info!(
        strategy = %options.strategy.unwrap_or_default(),
        sensitivity = ?options.sensitivity,
        forced_model = options.force_model.as_deref().unwrap_or("-"),
        "completion request"
    );

    let response = state.engine.complete(&request.prompt, &options).await?;
    Ok(Json(response))
}
