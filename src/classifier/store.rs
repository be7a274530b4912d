//! Vector-store adapter for labelled classification examples.
//!
//! The production adapter talks to Qdrant over gRPC; the in-memory
//! implementation does an exact cosine scan and exists for tests and for
//! running without external services.

use crate::catalog::TaskCategory;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qdrant_client::qdrant::{
    vectors_config::Config, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QdrantValue, VectorParams, VectorsConfig,
};
use qdrant_client::{Payload, Qdrant};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// Name of the collection holding labelled examples.
pub const COLLECTION_NAME: &str = "llm_router_examples";

/// Payload stored with every example point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePayload {
    pub category: TaskCategory,
    pub text: String,
    pub source: String,
    pub added_at: DateTime<Utc>,
}

/// One nearest neighbour returned from a KNN search, in store order.
#[derive(Debug, Clone)]
pub struct ScoredExample {
    pub category: TaskCategory,
    pub score: f32,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vector store connection failed: {0}")]
    Connection(String),

    #[error("vector store operation failed: {0}")]
    Operation(String),

    #[error("malformed example payload: {0}")]
    Payload(String),
}

/// KNN search and upsert over the labelled-example collection.
#[async_trait]
pub trait VectorStore: Send + Sync + 'static {
    /// Create the collection with the given dimension and cosine distance
    /// if it does not exist yet.
    async fn ensure_collection(&self, dimension: usize) -> Result<(), StoreError>;

    /// Nearest neighbours of `vector`, best first.
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredExample>, StoreError>;

    /// Insert one labelled example with a fresh monotonic point id.
    async fn upsert(&self, vector: Vec<f32>, payload: ExamplePayload) -> Result<(), StoreError>;
}

/// Qdrant-backed store.
pub struct QdrantStore {
    client: Qdrant,
    next_point_id: AtomicU64,
}

impl QdrantStore {
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| StoreError::Connection(format!("{}: {}", url, e)))?;

        Ok(Self {
            client,
            // Millisecond seed keeps ids monotonic across restarts.
            next_point_id: AtomicU64::new(Utc::now().timestamp_millis() as u64),
        })
    }

    fn payload_for(payload: &ExamplePayload) -> Result<Payload, StoreError> {
        let json =
            serde_json::to_value(payload).map_err(|e| StoreError::Payload(e.to_string()))?;
        Payload::try_from(json).map_err(|e| StoreError::Payload(e.to_string()))
    }

    fn map_to_payload(map: HashMap<String, QdrantValue>) -> Result<ExamplePayload, StoreError> {
        let mut json = serde_json::Map::new();
        for (key, value) in map {
            json.insert(key, value.into());
        }
        serde_json::from_value(Value::Object(json)).map_err(|e| StoreError::Payload(e.to_string()))
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self, dimension: usize) -> Result<(), StoreError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| StoreError::Operation(format!("list collections: {}", e)))?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == COLLECTION_NAME);

        if !exists {
            let request =
                CreateCollectionBuilder::new(COLLECTION_NAME).vectors_config(VectorsConfig {
                    config: Some(Config::Params(VectorParams {
                        size: dimension as u64,
                        distance: Distance::Cosine.into(),
                        ..Default::default()
                    })),
                });

            self.client
                .create_collection(request)
                .await
                .map_err(|e| StoreError::Operation(format!("create collection: {}", e)))?;

            tracing::info!(collection = COLLECTION_NAME, dimension, "created collection");
        }

        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredExample>, StoreError> {
        let request = SearchPointsBuilder::new(COLLECTION_NAME, vector.to_vec(), limit as u64)
            .with_payload(true);

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| StoreError::Operation(format!("search: {}", e)))?;

        let mut hits = Vec::with_capacity(response.result.len());
        for point in response.result {
            match Self::map_to_payload(point.payload) {
                Ok(payload) => hits.push(ScoredExample {
                    category: payload.category,
                    score: point.score,
                }),
                // An unreadable point must not fail every classification.
                Err(e) => tracing::warn!(error = %e, "skipping point with bad payload"),
            }
        }
        Ok(hits)
    }

    async fn upsert(&self, vector: Vec<f32>, payload: ExamplePayload) -> Result<(), StoreError> {
        let id = self.next_point_id.fetch_add(1, Ordering::SeqCst);
        let point = PointStruct::new(id, vector, Self::payload_for(&payload)?);

        self.client
            .upsert_points(UpsertPointsBuilder::new(COLLECTION_NAME, vec![point]))
            .await
            .map_err(|e| StoreError::Operation(format!("upsert: {}", e)))?;

        Ok(())
    }
}

/// In-memory store used by tests: exact cosine scan over all points.
#[derive(Default)]
pub struct MemoryVectorStore {
    points: Mutex<Vec<(Vec<f32>, ExamplePayload)>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.lock().expect("memory store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn ensure_collection(&self, _dimension: usize) -> Result<(), StoreError> {
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredExample>, StoreError> {
        let points = self.points.lock().expect("memory store lock");
        let mut hits: Vec<ScoredExample> = points
            .iter()
            .map(|(v, payload)| ScoredExample {
                category: payload.category,
                score: cosine(vector, v),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn upsert(&self, vector: Vec<f32>, payload: ExamplePayload) -> Result<(), StoreError> {
        self.points
            .lock()
            .expect("memory store lock")
            .push((vector, payload));
        Ok(())
    }
}
