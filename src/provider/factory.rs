//! Provider client construction.

use super::{AnthropicClient, OpenAiCompatClient, ProviderClient, ProviderError, ProviderKind};
use reqwest::Client;
use std::sync::Arc;

/// Create the client for the configured provider.
///
/// All clients share one HTTP client for connection pooling; per-request
/// deadlines are applied at call sites.
pub fn create_provider(
    kind: ProviderKind,
    api_key: String,
    client: Arc<Client>,
) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    if api_key.trim().is_empty() {
        return Err(ProviderError::Configuration(format!(
            "{} requires an API key in {}",
            kind,
            kind.api_key_env()
        )));
    }

    Ok(match kind {
        ProviderKind::Anthropic => Arc::new(AnthropicClient::new(api_key, client)),
        _ => Arc::new(OpenAiCompatClient::new(kind, api_key, client)),
    })
}
