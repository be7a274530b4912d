//! Deterministic in-memory embedding runtime for tests.

use super::{EmbeddingError, EmbeddingRuntime};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Test double that synthesises keyword-driven vectors and counts calls,
/// so tests can assert that cached paths skip embedding entirely.
pub struct MockEmbedder {
    dimension: usize,
    calls: AtomicUsize,
    fixed: Mutex<HashMap<String, Vec<f32>>>,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            // The keyword axes below need at least six dimensions.
            dimension: dimension.max(6),
            calls: AtomicUsize::new(0),
            fixed: Mutex::new(HashMap::new()),
        }
    }

    /// Pin the vector returned for an exact input text.
    pub fn with_vector(self, text: &str, vector: Vec<f32>) -> Self {
        self.fixed
            .lock()
            .expect("mock embedder lock")
            .insert(text.to_string(), vector);
        self
    }

    /// Number of `embed` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn synthesise(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let lower = text.to_lowercase();

        if lower.contains("code") || lower.contains("function") || lower.contains("rust") {
            vector[0] = 1.0;
        }
        if lower.contains("poem") || lower.contains("story") {
            vector[1] = 1.0;
        }
        if lower.contains("why") || lower.contains("prove") {
            vector[2] = 1.0;
        }
        if lower.contains("csv") || lower.contains("dataset") {
            vector[3] = 1.0;
        }
        if vector.iter().all(|v| *v == 0.0) {
            vector[4] = 1.0;
        }
        vector[5] = (text.len() as f32).min(100.0) / 100.0;

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingRuntime for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(vector) = self.fixed.lock().expect("mock embedder lock").get(text) {
            return Ok(vector.clone());
        }
        Ok(self.synthesise(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}
