//! Shared test utilities for integration tests.
//!
//! Provides reusable builders for model profiles, a scripted provider
//! with per-model behaviours and call counters, a fixed-result classifier
//! and an engine builder wired to in-memory collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use waypoint::audit::MemoryAuditSink;
use waypoint::catalog::{
    filter_candidates, LatencyTier, ModelProfile, ModelTier, PrivacySensitivity, QualityScores,
    TaskCategory,
};
use waypoint::classifier::{
    CategoryScores, ClassificationResult, ClassificationSource, Classifier, ClassifierError,
};
use waypoint::embedding::estimate_tokens;
use waypoint::provider::{
    CompletionChoice, CompletionData, CompletionMessage, CompletionUsage, ProviderClient,
    ProviderError, ProviderKind, ProviderReply,
};
use waypoint::retry::RetryPolicy;
use waypoint::router::RouterEngine;

// =============================================================================
// Profile builders
// =============================================================================

/// Model profile with sensible defaults: $1/$2 per 1M tokens, 128k
/// context, fast, uniform quality 5, cleared for sensitive data.
pub fn make_profile(id: &str) -> ModelProfile {
    ModelProfile {
        id: id.to_string(),
        display_name: id.to_string(),
        tier: ModelTier::General,
        cost_per_1m_input: 1.0,
        cost_per_1m_output: 2.0,
        context_window: 128_000,
        strengths: vec![],
        supports_sensitive: true,
        latency_tier: LatencyTier::Fast,
        quality: uniform_quality(5),
    }
}

pub fn uniform_quality(score: u8) -> QualityScores {
    QualityScores {
        simple: score,
        code: score,
        reasoning: score,
        data_analysis: score,
        creative: score,
    }
}

pub fn make_profile_with_quality(id: &str, score: u8) -> ModelProfile {
    ModelProfile {
        quality: uniform_quality(score),
        ..make_profile(id)
    }
}

// =============================================================================
// Scripted provider
// =============================================================================

#[derive(Debug, Clone)]
pub enum ModelBehaviour {
    Succeed {
        content: Option<String>,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
        latency_ms: u64,
    },
    Fail,
}

impl ModelBehaviour {
    pub fn succeed(content: &str, prompt_tokens: u32, completion_tokens: u32) -> Self {
        ModelBehaviour::Succeed {
            content: Some(content.to_string()),
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            latency_ms: 200,
        }
    }
}

/// Provider double: behaviours are keyed by model id and every call is
/// counted. Models without a scripted behaviour fail.
pub struct ScriptedProvider {
    models: Vec<ModelProfile>,
    behaviours: HashMap<String, ModelBehaviour>,
    calls: DashMap<String, u64>,
}

impl ScriptedProvider {
    pub fn new(models: Vec<ModelProfile>) -> Self {
        Self {
            models,
            behaviours: HashMap::new(),
            calls: DashMap::new(),
        }
    }

    pub fn behaviour(mut self, model_id: &str, behaviour: ModelBehaviour) -> Self {
        self.behaviours.insert(model_id.to_string(), behaviour);
        self
    }

    /// Completion calls seen for one model, across retries.
    pub fn calls(&self, model_id: &str) -> u64 {
        self.calls.get(model_id).map(|c| *c).unwrap_or(0)
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn get_all(&self) -> &[ModelProfile] {
        &self.models
    }

    fn get_candidates(
        &self,
        sensitivity: PrivacySensitivity,
        min_context_window: u32,
        max_cost_per_1m: Option<f64>,
    ) -> Vec<ModelProfile> {
        filter_candidates(&self.models, sensitivity, min_context_window, max_cost_per_1m)
    }

    async fn complete(
        &self,
        _prompt: &str,
        model_id: &str,
    ) -> Result<ProviderReply, ProviderError> {
        *self.calls.entry(model_id.to_string()).or_insert(0) += 1;

        match self.behaviours.get(model_id) {
            Some(ModelBehaviour::Succeed {
                content,
                prompt_tokens,
                completion_tokens,
                latency_ms,
            }) => Ok(ProviderReply {
                data: CompletionData {
                    choices: vec![CompletionChoice {
                        message: CompletionMessage {
                            content: content.clone(),
                        },
                    }],
                    usage: Some(CompletionUsage {
                        prompt_tokens: *prompt_tokens,
                        completion_tokens: *completion_tokens,
                    }),
                },
                latency_ms: *latency_ms,
            }),
            Some(ModelBehaviour::Fail) | None => Err(ProviderError::Upstream {
                status: 503,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

// =============================================================================
// Classifier double
// =============================================================================

pub fn classification(category: TaskCategory, confidence: f64) -> ClassificationResult {
    ClassificationResult {
        category,
        confidence,
        scores: CategoryScores::default(),
        signals: vec![],
        estimated_input_tokens: estimate_tokens("test prompt"),
        source: ClassificationSource::Semantic,
    }
}

/// Classifier double returning one fixed result and recording examples.
pub struct StaticClassifier {
    result: ClassificationResult,
    examples: std::sync::Mutex<Vec<(String, TaskCategory)>>,
}

impl StaticClassifier {
    pub fn new(result: ClassificationResult) -> Self {
        Self {
            result,
            examples: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn examples(&self) -> Vec<(String, TaskCategory)> {
        self.examples.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for StaticClassifier {
    async fn classify(&self, _prompt: &str) -> Result<ClassificationResult, ClassifierError> {
        Ok(self.result.clone())
    }

    async fn add_example(
        &self,
        text: &str,
        category: TaskCategory,
    ) -> Result<(), ClassifierError> {
        self.examples
            .lock()
            .unwrap()
            .push((text.to_string(), category));
        Ok(())
    }

    async fn ensure_collection(&self) -> Result<(), ClassifierError> {
        Ok(())
    }
}

// =============================================================================
// Engine builder
// =============================================================================

/// Engine wired to the given doubles, with backoff sleeps disabled.
pub fn make_engine(
    classifier: Arc<dyn Classifier>,
    provider: Arc<dyn ProviderClient>,
    audit: Arc<MemoryAuditSink>,
) -> RouterEngine {
    RouterEngine::new(classifier, provider, audit).with_retry_policy(RetryPolicy::immediate(2))
}

/// Let fire-and-forget audit tasks drain.
pub async fn flush_audit() {
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
}
