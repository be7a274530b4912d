//! Environment-driven configuration.
//!
//! Everything the engine needs comes from environment variables; CLI
//! flags may override the port and log level afterwards. The API key for
//! the active provider is the only hard requirement besides the external
//! service URLs.

use crate::embedding::DEFAULT_MODEL;
use crate::provider::ProviderKind;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Active provider; unknown `LLM_PROVIDER` values fall back to
    /// openrouter.
    pub provider: ProviderKind,
    /// API key for the active provider.
    pub api_key: String,
    pub qdrant_url: String,
    pub redis_url: String,
    pub database_url: String,
    /// Where embedding model weights are cached on disk.
    pub models_cache_dir: Option<PathBuf>,
    /// Hugging Face name of the embedding model.
    pub embedding_model: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match std::env::var("LLM_PROVIDER") {
            Ok(value) => ProviderKind::parse_or_default(&value),
            Err(_) => ProviderKind::default(),
        };

        let api_key = std::env::var(provider.api_key_env())
            .map_err(|_| ConfigError::MissingVar(provider.api_key_env()))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                message: format!("'{}' is not a port number", value),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            provider,
            api_key,
            qdrant_url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| DEFAULT_QDRANT_URL.to_string()),
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            database_url,
            models_cache_dir: std::env::var("MODELS_CACHE_DIR").ok().map(PathBuf::from),
            embedding_model: std::env::var("HF_MODEL_NAME")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                var: "PORT",
                message: "port must be non-zero".to_string(),
            });
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: self.provider.api_key_env(),
                message: "API key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
