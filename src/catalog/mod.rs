//! Model catalogue and routing domain types.
//!
//! Each provider owns a static list of [`ModelProfile`]s. The candidate
//! filter shared by every provider lives here; ranking lives in
//! [`crate::routing`].

mod anthropic;
mod deepseek;
mod google;
mod openai;
mod openrouter;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::provider::ProviderKind;

/// Task category inferred by the classifier.
///
/// The set is closed: adding a category requires updating every model's
/// quality scores and the seed corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Simple,
    Code,
    Reasoning,
    DataAnalysis,
    Creative,
}

impl TaskCategory {
    /// Declaration order; classifier tie-breaks and score iteration both
    /// follow this order so behaviour stays reproducible.
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Simple,
        TaskCategory::Code,
        TaskCategory::Reasoning,
        TaskCategory::DataAnalysis,
        TaskCategory::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Simple => "simple",
            TaskCategory::Code => "code",
            TaskCategory::Reasoning => "reasoning",
            TaskCategory::DataAnalysis => "data_analysis",
            TaskCategory::Creative => "creative",
        }
    }
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(TaskCategory::Simple),
            "code" => Ok(TaskCategory::Code),
            "reasoning" => Ok(TaskCategory::Reasoning),
            "data_analysis" => Ok(TaskCategory::DataAnalysis),
            "creative" => Ok(TaskCategory::Creative),
            _ => Err(format!("Unknown task category: {}", s)),
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Privacy sensitivity of a prompt. `Internal` and `Sensitive` are treated
/// identically for filtering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacySensitivity {
    Public,
    #[default]
    Internal,
    Sensitive,
}

impl PrivacySensitivity {
    /// Whether this sensitivity restricts routing to models cleared for
    /// non-public data.
    pub fn requires_private_capable(&self) -> bool {
        matches!(
            self,
            PrivacySensitivity::Internal | PrivacySensitivity::Sensitive
        )
    }
}

/// Informational capability tier of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    General,
    Medium,
    Hard,
}

/// Expected response latency class, carrying the ranking weights 3/2/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyTier {
    Fast,
    Medium,
    Slow,
}

impl LatencyTier {
    pub fn rank_weight(&self) -> u8 {
        match self {
            LatencyTier::Fast => 3,
            LatencyTier::Medium => 2,
            LatencyTier::Slow => 1,
        }
    }
}

/// Per-category quality score in 0..10. One field per category, so the
/// mapping is total by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScores {
    pub simple: u8,
    pub code: u8,
    pub reasoning: u8,
    pub data_analysis: u8,
    pub creative: u8,
}

impl QualityScores {
    pub fn get(&self, category: TaskCategory) -> u8 {
        match category {
            TaskCategory::Simple => self.simple,
            TaskCategory::Code => self.code,
            TaskCategory::Reasoning => self.reasoning,
            TaskCategory::DataAnalysis => self.data_analysis,
            TaskCategory::Creative => self.creative,
        }
    }

    pub fn max(&self) -> u8 {
        TaskCategory::ALL
            .iter()
            .map(|c| self.get(*c))
            .max()
            .unwrap_or(0)
    }
}

/// Immutable description of one model in a provider's catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Wire identifier the provider expects, unique within the provider.
    pub id: String,
    pub display_name: String,
    pub tier: ModelTier,
    /// USD per 1,000,000 input tokens.
    pub cost_per_1m_input: f64,
    /// USD per 1,000,000 output tokens.
    pub cost_per_1m_output: f64,
    /// Context window in tokens.
    pub context_window: u32,
    /// Informational category tags; ranking uses `quality`, not this.
    pub strengths: Vec<TaskCategory>,
    /// False means the model may never serve internal or sensitive prompts.
    pub supports_sensitive: bool,
    pub latency_tier: LatencyTier,
    pub quality: QualityScores,
}

impl ModelProfile {
    /// Check the catalogue invariants: non-negative costs, positive context
    /// window, quality scores within 0..10.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("model id must not be empty".to_string());
        }
        if self.cost_per_1m_input < 0.0 || self.cost_per_1m_output < 0.0 {
            return Err(format!("model '{}' has a negative cost", self.id));
        }
        if self.context_window == 0 {
            return Err(format!("model '{}' has a zero context window", self.id));
        }
        if self.quality.max() > 10 {
            return Err(format!("model '{}' has a quality score above 10", self.id));
        }
        Ok(())
    }
}

/// Keep a model iff all three clauses hold: cleared for the requested
/// sensitivity, context window large enough, input cost under the cap.
pub fn filter_candidates(
    models: &[ModelProfile],
    sensitivity: PrivacySensitivity,
    min_context_window: u32,
    max_cost_per_1m: Option<f64>,
) -> Vec<ModelProfile> {
    models
        .iter()
        .filter(|m| !sensitivity.requires_private_capable() || m.supports_sensitive)
        .filter(|m| m.context_window >= min_context_window)
        .filter(|m| max_cost_per_1m.is_none_or(|cap| m.cost_per_1m_input <= cap))
        .cloned()
        .collect()
}

/// Static model catalogue for one provider.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    provider: ProviderKind,
    models: Vec<ModelProfile>,
}

impl ModelCatalog {
    pub fn for_provider(provider: ProviderKind) -> Self {
        let models = match provider {
            ProviderKind::OpenRouter => openrouter::models(),
            ProviderKind::Google => google::models(),
            ProviderKind::Anthropic => anthropic::models(),
            ProviderKind::OpenAi => openai::models(),
            ProviderKind::DeepSeek => deepseek::models(),
        };
        Self { provider, models }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn get_all(&self) -> &[ModelProfile] {
        &self.models
    }

    pub fn find(&self, id: &str) -> Option<&ModelProfile> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn get_candidates(
        &self,
        sensitivity: PrivacySensitivity,
        min_context_window: u32,
        max_cost_per_1m: Option<f64>,
    ) -> Vec<ModelProfile> {
        filter_candidates(&self.models, sensitivity, min_context_window, max_cost_per_1m)
    }
}
