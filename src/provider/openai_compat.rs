//! Client for OpenAI-compatible providers.
//!
//! OpenRouter, Google, OpenAI and DeepSeek all accept the same
//! `/chat/completions` request with a bearer token, and their responses
//! already match the common completion shape, so they share one client.

use super::{
    CompletionData, ProviderClient, ProviderError, ProviderKind, ProviderReply, REQUEST_TIMEOUT,
};
use crate::catalog::{ModelCatalog, ModelProfile, PrivacySensitivity};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

pub struct OpenAiCompatClient {
    kind: ProviderKind,
    base_url: String,
    api_key: String,
    catalog: ModelCatalog,
    client: Arc<Client>,
}

fn default_base_url(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
        ProviderKind::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
        ProviderKind::OpenAi => "https://api.openai.com/v1",
        ProviderKind::DeepSeek => "https://api.deepseek.com/v1",
        // The factory never routes Anthropic here; its endpoint is not
        // OpenAI-compatible.
        ProviderKind::Anthropic => "https://api.anthropic.com/v1",
    }
}

impl OpenAiCompatClient {
    pub fn new(kind: ProviderKind, api_key: String, client: Arc<Client>) -> Self {
        Self {
            kind,
            base_url: default_base_url(kind).to_string(),
            api_key,
            catalog: ModelCatalog::for_provider(kind),
            client,
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ProviderClient for OpenAiCompatClient {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn get_all(&self) -> &[ModelProfile] {
        self.catalog.get_all()
    }

    fn get_candidates(
        &self,
        sensitivity: PrivacySensitivity,
        min_context_window: u32,
        max_cost_per_1m: Option<f64>,
    ) -> Vec<ModelProfile> {
        self.catalog
            .get_candidates(sensitivity, min_context_window, max_cost_per_1m)
    }

    async fn complete(
        &self,
        prompt: &str,
        model_id: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(REQUEST_TIMEOUT.as_millis() as u64)
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let data: CompletionData = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(REQUEST_TIMEOUT.as_millis() as u64)
            } else {
                ProviderError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(ProviderReply {
            data,
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}
