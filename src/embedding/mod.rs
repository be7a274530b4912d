//! In-process embedding runtime and prompt fingerprinting.
//!
//! The runtime is a process-wide singleton in discipline, not mechanism:
//! it is loaded (and thereby warmed up) once at boot and injected as an
//! `Arc<dyn EmbeddingRuntime>` everywhere it is needed.

mod local;
mod mock;

pub use local::{LocalEmbedder, DEFAULT_MODEL};
pub use mock::MockEmbedder;

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors from the embedding runtime.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The underlying model failed to load or to embed.
    #[error("embedding model error: {0}")]
    Model(String),

    /// The blocking embedding task was cancelled or panicked.
    #[error("embedding task aborted: {0}")]
    TaskAborted(String),
}

/// Turns text into a fixed-dimension vector.
#[async_trait]
pub trait EmbeddingRuntime: Send + Sync + 'static {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of the vectors this runtime produces.
    fn dimension(&self) -> usize;

    /// Name of the loaded model, for health reporting.
    fn model_name(&self) -> &str;
}

/// Estimated token count for a prompt: `ceil(len / 4)`.
pub fn estimate_tokens(text: &str) -> u32 {
    text.len().div_ceil(4) as u32
}

/// Fast non-cryptographic fingerprint of a prompt, used only as a cache
/// key: 64-bit hash of the lowercased, trimmed text, rendered as hex.
pub fn fingerprint(prompt: &str) -> String {
    let mut hasher = DefaultHasher::new();
    prompt.trim().to_lowercase().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(200)), 50);
    }

    #[test]
    fn fingerprint_normalises_case_and_whitespace() {
        assert_eq!(fingerprint("Hello World"), fingerprint("  hello world  "));
        assert_ne!(fingerprint("hello world"), fingerprint("hello worlds"));
    }

    #[test]
    fn fingerprint_is_fixed_width_hex() {
        let fp = fingerprint("some prompt");
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
