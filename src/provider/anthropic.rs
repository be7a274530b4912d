//! Anthropic client.
//!
//! The Messages API has its own request and response format; this client
//! translates both directions so the rest of the engine only ever sees the
//! common completion shape.

use super::{
    CompletionChoice, CompletionData, CompletionMessage, CompletionUsage, ProviderClient,
    ProviderError, ProviderKind, ProviderReply, REQUEST_TIMEOUT,
};
use crate::catalog::{ModelCatalog, ModelProfile, PrivacySensitivity};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Output budget for every completion request.
pub const MAX_TOKENS: u32 = 8096;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: Vec<AnthropicContent<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Translate an Anthropic response into the common completion shape.
fn translate_response(response: AnthropicResponse) -> CompletionData {
    CompletionData {
        choices: vec![CompletionChoice {
            message: CompletionMessage {
                content: response.content.first().map(|block| block.text.clone()),
            },
        }],
        usage: Some(CompletionUsage {
            prompt_tokens: Some(response.usage.input_tokens),
            completion_tokens: Some(response.usage.output_tokens),
        }),
    }
}

pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    catalog: ModelCatalog,
    client: Arc<Client>,
}

impl AnthropicClient {
    pub fn new(api_key: String, client: Arc<Client>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            catalog: ModelCatalog::for_provider(ProviderKind::Anthropic),
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
impl ProviderClient for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
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
        let url = format!("{}/v1/messages", self.base_url);
        let body = AnthropicRequest {
            model: model_id,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: vec![AnthropicContent {
                    content_type: "text",
                    text: prompt,
                }],
            }],
        };

        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
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

        let parsed: AnthropicResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(REQUEST_TIMEOUT.as_millis() as u64)
            } else {
                ProviderError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(ProviderReply {
            data: translate_response(parsed),
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}
