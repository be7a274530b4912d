//! Provider clients.
//!
//! Each client executes single-turn completions against one provider's
//! HTTP API and owns that provider's static model catalogue. Anthropic has
//! its own wire format and is translated into the common shape; every
//! other supported provider speaks the OpenAI-compatible protocol.

pub mod anthropic;
pub mod error;
pub mod factory;
pub mod openai_compat;

pub use anthropic::AnthropicClient;
pub use error::ProviderError;
pub use factory::create_provider;
pub use openai_compat::OpenAiCompatClient;

use crate::catalog::{ModelProfile, PrivacySensitivity};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Overall deadline for one provider HTTP call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported providers. Unknown configuration values fall back to
/// OpenRouter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenRouter,
    Google,
    Anthropic,
    OpenAi,
    DeepSeek,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Google => "google",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
            ProviderKind::Google => "GOOGLE_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// Parse a configured provider name, falling back to OpenRouter for
    /// anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(provider = %value, "unknown provider, falling back to openrouter");
            ProviderKind::OpenRouter
        })
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openrouter" => Ok(ProviderKind::OpenRouter),
            "google" => Ok(ProviderKind::Google),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "openai" => Ok(ProviderKind::OpenAi),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message inside a completion choice. `content` stays optional because
/// some providers return an explicit null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

/// Token usage as reported by the provider. Absent counts fall back to
/// classifier estimates in the orchestrator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
}

/// Provider responses normalised into one common shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionData {
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
}

/// A completed call: the normalised body plus the measured wall time from
/// just before the request until the body was fully read.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub data: CompletionData,
    pub latency_ms: u64,
}

/// Completion execution plus catalogue access for one provider.
///
/// Object-safe; used as `Arc<dyn ProviderClient>` so tests can substitute
/// a scripted implementation.
#[async_trait]
pub trait ProviderClient: Send + Sync + 'static {
    fn kind(&self) -> ProviderKind;

    /// The provider's full static catalogue.
    fn get_all(&self) -> &[ModelProfile];

    /// Catalogue entries passing the shared three-clause filter.
    fn get_candidates(
        &self,
        sensitivity: PrivacySensitivity,
        min_context_window: u32,
        max_cost_per_1m: Option<f64>,
    ) -> Vec<ModelProfile>;

    /// Execute one single-turn completion against `model_id`.
    async fn complete(&self, prompt: &str, model_id: &str)
        -> Result<ProviderReply, ProviderError>;
}
