//! Router orchestrator.
//!
//! Ties the classifier, the provider catalogue, the ranking strategies,
//! the per-model circuit breakers, the retry driver and the audit sink
//! into the request lifecycle: classify, assemble candidates, walk the
//! fallback chain, audit the winner.

pub mod error;

pub use error::RouterError;

use crate::audit::{preview, AuditEntry, AuditSink};
use crate::breaker::{BreakerConfig, CircuitBreaker};
use crate::catalog::{ModelProfile, PrivacySensitivity, TaskCategory};
use crate::classifier::{
    CategoryScores, ClassificationResult, ClassificationSource, Classifier,
};
use crate::embedding::{estimate_tokens, fingerprint};
use crate::provider::ProviderClient;
use crate::retry::{with_retry, RetryPolicy};
use crate::routing::{strategy_for, RoutingStrategy};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Classifications below this confidence are escalated to `reasoning`.
pub const CONFIDENCE_MIN: f64 = 0.5;

/// Per-request routing preferences. Everything is optional; the defaults
/// are balanced strategy, internal sensitivity and no constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingOptions {
    pub strategy: Option<RoutingStrategy>,
    pub sensitivity: PrivacySensitivity,
    pub require_context_window: u32,
    #[serde(rename = "maxCostPer1MTokens")]
    pub max_cost_per_1m_tokens: Option<f64>,
    pub force_category: Option<TaskCategory>,
    pub force_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTokens {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The answer handed back to the caller, with routing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    pub content: String,
    /// Model actually used.
    pub model: String,
    pub category: TaskCategory,
    pub estimated_cost_usd: f64,
    pub latency_ms: u64,
    pub usage: UsageTokens,
    /// True iff the model used was not the first-ranked candidate.
    pub fallback_used: bool,
}

pub struct RouterEngine {
    classifier: Arc<dyn Classifier>,
    provider: Arc<dyn ProviderClient>,
    audit: Arc<dyn AuditSink>,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
    retry: RetryPolicy,
    breaker_config: BreakerConfig,
}

impl RouterEngine {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        provider: Arc<dyn ProviderClient>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            classifier,
            provider,
            audit,
            breakers: DashMap::new(),
            retry: RetryPolicy::default(),
            breaker_config: BreakerConfig::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_breaker_config(mut self, config: BreakerConfig) -> Self {
        self.breaker_config = config;
        self
    }

    /// One breaker per model id, created lazily on first sight.
    fn breaker_for(&self, model_id: &str) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(model_id.to_string())
            .or_insert_with(|| {
                Arc::new(CircuitBreaker::new(model_id, self.breaker_config))
            })
            .clone()
    }

    async fn classification_for(
        &self,
        prompt: &str,
        opts: &RoutingOptions,
    ) -> Result<ClassificationResult, RouterError> {
        let mut classification = match opts.force_category {
            Some(category) => ClassificationResult {
                category,
                confidence: 1.0,
                scores: CategoryScores::default(),
                signals: Vec::new(),
                estimated_input_tokens: estimate_tokens(prompt),
                source: ClassificationSource::Semantic,
            },
            None => self.classifier.classify(prompt).await?,
        };

        // "Unknown means think harder": uncertain prompts route as
        // reasoning, keeping the measured confidence intact.
        if classification.confidence < CONFIDENCE_MIN {
            warn!(
                category = %classification.category,
                confidence = classification.confidence,
                "low classification confidence, escalating to reasoning"
            );
            classification.category = TaskCategory::Reasoning;
        }

        Ok(classification)
    }

    fn assemble_candidates(
        &self,
        opts: &RoutingOptions,
        category: TaskCategory,
    ) -> Result<Vec<ModelProfile>, RouterError> {
        if let Some(forced) = &opts.force_model {
            let profile = self
                .provider
                .get_all()
                .iter()
                .find(|m| m.id == *forced)
                .cloned()
                .ok_or_else(|| RouterError::UnknownModel {
                    model: forced.clone(),
                })?;
            return Ok(vec![profile]);
        }

        let filtered = self.provider.get_candidates(
            opts.sensitivity,
            opts.require_context_window,
            opts.max_cost_per_1m_tokens,
        );
        let ranked = strategy_for(opts.strategy).select(&filtered, category);
        let admitted: Vec<ModelProfile> = ranked
            .into_iter()
            .filter(|m| self.breaker_for(&m.id).can_execute())
            .collect();

        if admitted.is_empty() {
            return Err(RouterError::NoModelsAvailable);
        }
        Ok(admitted)
    }

    /// Route one prompt and return the chosen model's answer.
    pub async fn complete(
        &self,
        prompt: &str,
        opts: &RoutingOptions,
    ) -> Result<LlmResponse, RouterError> {
        let classification = self.classification_for(prompt, opts).await?;
        let candidates = self.assemble_candidates(opts, classification.category)?;
        let first_choice = candidates[0].id.clone();

        info!(
            category = %classification.category,
            confidence = classification.confidence,
            candidates = candidates.len(),
            "routing prompt"
        );

        for profile in &candidates {
            let breaker = self.breaker_for(&profile.id);

            let outcome = with_retry(self.retry, || {
                self.provider.complete(prompt, &profile.id)
            })
            .await;

            match outcome {
                Ok(reply) => {
                    breaker.record_success();

                    let usage = reply.data.usage.unwrap_or_default();
                    let input_tokens = usage
                        .prompt_tokens
                        .unwrap_or(classification.estimated_input_tokens);
                    let output_tokens = usage.completion_tokens.unwrap_or(0);
                    let estimated_cost_usd = input_tokens as f64 / 1e6
                        * profile.cost_per_1m_input
                        + output_tokens as f64 / 1e6 * profile.cost_per_1m_output;
                    let content = reply
                        .data
                        .choices
                        .first()
                        .and_then(|choice| choice.message.content.clone())
                        .unwrap_or_default();

                    let response = LlmResponse {
                        content,
                        model: profile.id.clone(),
                        category: classification.category,
                        estimated_cost_usd,
                        latency_ms: reply.latency_ms,
                        usage: UsageTokens {
                            input_tokens,
                            output_tokens,
                        },
                        fallback_used: profile.id != first_choice,
                    };

                    self.spawn_audit(prompt, &classification, &response);

                    info!(
                        model = %response.model,
                        latency_ms = response.latency_ms,
                        fallback = response.fallback_used,
                        "completion served"
                    );
                    return Ok(response);
                }
                Err(error) => {
                    breaker.record_failure();
                    warn!(model = %profile.id, error = %error, "candidate failed, trying next");
                }
            }
        }

        Err(RouterError::AllModelsFailed {
            attempted: candidates.len(),
        })
    }

    /// Record an operator-corrected (prompt, category) pair.
    pub async fn feedback(
        &self,
        prompt: &str,
        category: TaskCategory,
    ) -> Result<(), RouterError> {
        self.classifier.add_example(prompt, category).await?;
        Ok(())
    }

    /// Fire-and-forget: a failing sink is logged inside the spawned task
    /// and never surfaces into the request.
    fn spawn_audit(
        &self,
        prompt: &str,
        classification: &ClassificationResult,
        response: &LlmResponse,
    ) {
        let entry = AuditEntry {
            prompt_hash: fingerprint(prompt),
            prompt_preview: preview(prompt),
            category: response.category,
            confidence: classification.confidence,
            source: classification.source,
            model_used: response.model.clone(),
            cost_usd: response.estimated_cost_usd,
            latency_ms: response.latency_ms,
        };
        let sink = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(error) = sink.insert(entry).await {
                warn!(%error, "audit insert dropped");
            }
        });
    }
}
