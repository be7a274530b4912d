//! Health check endpoint handler.

use crate::api::{AppState, HealthResponse};
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

/// GET /health - readiness probe with the loaded embedding model.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.embedding_model.clone(),
        ts: Utc::now(),
    })
}
