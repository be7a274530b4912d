//! Request and response types for the HTTP surface.
//!
//! The engine-level types ([`RoutingOptions`], [`LlmResponse`]) already
//! carry their wire representation; this module adds the envelopes around
//! them.

use crate::catalog::TaskCategory;
use crate::router::RoutingOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /complete`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteRequest {
    pub prompt: String,
    #[serde(default)]
    pub options: Option<RoutingOptions>,
}

/// Body of `POST /feedback`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub prompt: String,
    #[serde(rename = "correctCategory")]
    pub correct_category: TaskCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Embedding model the classifier was booted with.
    pub model: String,
    pub ts: DateTime<Utc>,
}
