//! Error types for provider calls.

use thiserror::Error;

/// Errors that can occur while executing one completion against a
/// provider. All variants except `Configuration` participate in retry and
/// breaker accounting.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network connectivity error (DNS, connection refused, reset, etc.).
    #[error("network error: {0}")]
    Transport(String),

    /// The request exceeded its deadline.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// The client could not be constructed or configured.
    #[error("provider configuration error: {0}")]
    Configuration(String),
}
