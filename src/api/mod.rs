//! HTTP front door.
//!
//! Three JSON endpoints over the router engine:
//!
//! - `POST /complete` - route a prompt and return the model's answer
//! - `POST /feedback` - record a corrected (prompt, category) pair
//! - `GET /health` - readiness probe
//!
//! Validation failures map to 400 and orchestrator failures to 500, both
//! with an `{error, code}` body.

mod complete;
mod error;
mod feedback;
mod health;
pub mod types;

pub use error::ApiError;
pub use types::*;

use crate::router::RouterEngine;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Maximum request body size (1 MiB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub engine: Arc<RouterEngine>,
    /// Embedding model loaded at boot, reported by the health endpoint.
    pub embedding_model: String,
}

impl AppState {
    pub fn new(engine: Arc<RouterEngine>, embedding_model: String) -> Self {
        Self {
            engine,
            embedding_model,
        }
    }
}

/// Create the API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/complete", post(complete::handle))
        .route("/feedback", post(feedback::handle))
        .route("/health", get(health::handle))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}
