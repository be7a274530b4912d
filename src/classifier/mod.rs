//! Semantic prompt classifier.
//!
//! Composes the embedding runtime, the vector store and the cache into a
//! two-pass nearest-neighbour classifier. The first pass is a small KNN
//! with linear vote weights; when it is not confident enough, a wider pass
//! with cubic weights gets a chance to beat it. Confident results are
//! cached for a day; uncertain ones never are.

pub mod cache;
pub mod store;

pub use cache::{
    CacheError, ClassificationCache, MemoryCache, RedisCache, CACHE_KEY_PREFIX, CACHE_TTL_SECS,
};
pub use store::{
    ExamplePayload, MemoryVectorStore, QdrantStore, ScoredExample, StoreError, VectorStore,
    COLLECTION_NAME,
};

use crate::catalog::TaskCategory;
use crate::embedding::{estimate_tokens, fingerprint, EmbeddingError, EmbeddingRuntime};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Results at or above this confidence are cached.
pub const HIGH_CONFIDENCE: f64 = 0.75;

/// Neighbour count for the first, linear-weighted pass.
const FIRST_PASS_K: usize = 7;

/// Neighbour count for the second, cubic-weighted pass.
const SECOND_PASS_K: usize = 20;

/// Where a classification came from. `Llm` is reserved for an external
/// classifier; this engine produces only the first two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Cache,
    Semantic,
    Llm,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationSource::Cache => "cache",
            ClassificationSource::Semantic => "semantic",
            ClassificationSource::Llm => "llm",
        }
    }
}

/// Normalised confidence share per category. Fields cover the whole closed
/// set, and iteration helpers walk them in declaration order so float ties
/// break deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    pub simple: f64,
    pub code: f64,
    pub reasoning: f64,
    pub data_analysis: f64,
    pub creative: f64,
}

impl CategoryScores {
    pub fn get(&self, category: TaskCategory) -> f64 {
        match category {
            TaskCategory::Simple => self.simple,
            TaskCategory::Code => self.code,
            TaskCategory::Reasoning => self.reasoning,
            TaskCategory::DataAnalysis => self.data_analysis,
            TaskCategory::Creative => self.creative,
        }
    }

    fn get_mut(&mut self, category: TaskCategory) -> &mut f64 {
        match category {
            TaskCategory::Simple => &mut self.simple,
            TaskCategory::Code => &mut self.code,
            TaskCategory::Reasoning => &mut self.reasoning,
            TaskCategory::DataAnalysis => &mut self.data_analysis,
            TaskCategory::Creative => &mut self.creative,
        }
    }

    pub fn total(&self) -> f64 {
        TaskCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Category with the maximum share; the first category in declaration
    /// order wins exact ties.
    pub fn leader(&self) -> (TaskCategory, f64) {
        let mut best = (TaskCategory::ALL[0], self.get(TaskCategory::ALL[0]));
        for category in &TaskCategory::ALL[1..] {
            let share = self.get(*category);
            if share > best.1 {
                best = (*category, share);
            }
        }
        best
    }
}

/// Outcome of classifying one prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub category: TaskCategory,
    /// Normalised share of the winning category, in [0, 1].
    pub confidence: f64,
    pub scores: CategoryScores,
    /// Neighbour list in store order, `"<category>(<score>)"`. Debug aid
    /// only; never used for logic.
    pub signals: Vec<String>,
    pub estimated_input_tokens: u32,
    pub source: ClassificationSource,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector store failed: {0}")]
    Store(#[from] StoreError),

    #[error("classification cache failed: {0}")]
    Cache(#[from] CacheError),
}

/// Classification capability consumed by the router orchestrator.
#[async_trait]
pub trait Classifier: Send + Sync + 'static {
    async fn classify(&self, prompt: &str) -> Result<ClassificationResult, ClassifierError>;

    async fn add_example(&self, text: &str, category: TaskCategory)
        -> Result<(), ClassifierError>;

    async fn ensure_collection(&self) -> Result<(), ClassifierError>;
}

#[derive(Clone, Copy)]
enum VoteWeighting {
    Linear,
    Cubic,
}

impl VoteWeighting {
    fn apply(&self, score: f32) -> f64 {
        let score = score as f64;
        match self {
            VoteWeighting::Linear => score,
            VoteWeighting::Cubic => score.powi(3),
        }
    }
}

/// Two-pass nearest-neighbour classifier.
pub struct SemanticClassifier {
    embedder: Arc<dyn EmbeddingRuntime>,
    store: Arc<dyn VectorStore>,
    cache: Arc<dyn ClassificationCache>,
}

impl SemanticClassifier {
    pub fn new(
        embedder: Arc<dyn EmbeddingRuntime>,
        store: Arc<dyn VectorStore>,
        cache: Arc<dyn ClassificationCache>,
    ) -> Self {
        Self {
            embedder,
            store,
            cache,
        }
    }

    async fn knn_pass(
        &self,
        vector: &[f32],
        k: usize,
        weighting: VoteWeighting,
    ) -> Result<(CategoryScores, Vec<String>), ClassifierError> {
        let hits = self.store.search(vector, k).await?;
        Ok(score_hits(&hits, weighting))
    }
}

/// Accumulate weighted votes per category and normalise by the vote sum
/// (1 when there were no votes, leaving every share at 0).
fn score_hits(hits: &[ScoredExample], weighting: VoteWeighting) -> (CategoryScores, Vec<String>) {
    let mut scores = CategoryScores::default();
    let mut signals = Vec::with_capacity(hits.len());

    for hit in hits {
        *scores.get_mut(hit.category) += weighting.apply(hit.score);
        signals.push(format!("{}({:.2})", hit.category, hit.score));
    }

    let total = scores.total();
    let divisor = if total > 0.0 { total } else { 1.0 };
    for category in TaskCategory::ALL {
        *scores.get_mut(category) /= divisor;
    }

    (scores, signals)
}

#[async_trait]
impl Classifier for SemanticClassifier {
    async fn classify(&self, prompt: &str) -> Result<ClassificationResult, ClassifierError> {
        let key = format!("{}{}", CACHE_KEY_PREFIX, fingerprint(prompt));

        if let Some(mut cached) = self.cache.get(&key).await? {
            cached.source = ClassificationSource::Cache;
            tracing::debug!(category = %cached.category, "classification served from cache");
            return Ok(cached);
        }

        let vector = self.embedder.embed(prompt).await?;

        let (scores, signals) = self
            .knn_pass(&vector, FIRST_PASS_K, VoteWeighting::Linear)
            .await?;
        let (category, confidence) = scores.leader();

        let mut result = ClassificationResult {
            category,
            confidence,
            scores,
            signals,
            estimated_input_tokens: estimate_tokens(prompt),
            source: ClassificationSource::Semantic,
        };

        if result.confidence < HIGH_CONFIDENCE {
            let (scores, signals) = self
                .knn_pass(&vector, SECOND_PASS_K, VoteWeighting::Cubic)
                .await?;
            let (category, confidence) = scores.leader();

            // The wider pass replaces the narrow one only when it is
            // strictly more confident.
            if confidence > result.confidence {
                tracing::debug!(
                    narrow = result.confidence,
                    wide = confidence,
                    "expanded pass won"
                );
                result.category = category;
                result.confidence = confidence;
                result.scores = scores;
                result.signals = signals;
            }
        }

        if result.confidence >= HIGH_CONFIDENCE {
            if let Err(e) = self.cache.set(&key, &result, CACHE_TTL_SECS).await {
                tracing::warn!(error = %e, "classification cache write failed");
            }
        }

        Ok(result)
    }

    async fn add_example(
        &self,
        text: &str,
        category: TaskCategory,
    ) -> Result<(), ClassifierError> {
        let vector = self.embedder.embed(text).await?;
        let payload = ExamplePayload {
            category,
            text: text.to_string(),
            source: "feedback".to_string(),
            added_at: Utc::now(),
        };
        self.store.upsert(vector, payload).await?;
        tracing::info!(%category, "labelled example recorded");
        Ok(())
    }

    async fn ensure_collection(&self) -> Result<(), ClassifierError> {
        self.store
            .ensure_collection(self.embedder.dimension())
            .await?;
        Ok(())
    }
}
