//! Key/value cache for classification results.
//!
//! Only high-confidence classifications are ever written here; the
//! classifier enforces that. The Redis implementation sets the value and
//! the TTL as two separate commands so an expiry failure cannot undo the
//! stored value.

use super::ClassificationResult;
use async_trait::async_trait;
use dashmap::DashMap;
use redis::AsyncCommands;
use thiserror::Error;

/// Prefix for classification cache keys; the suffix is the prompt
/// fingerprint.
pub const CACHE_KEY_PREFIX: &str = "llm:cls:";

/// Time-to-live for cached classifications: one day.
pub const CACHE_TTL_SECS: u64 = 86_400;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection failed: {0}")]
    Connection(String),

    #[error("cache operation failed: {0}")]
    Operation(String),

    #[error("cache serialisation failed: {0}")]
    Codec(String),
}

#[async_trait]
pub trait ClassificationCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<ClassificationResult>, CacheError>;

    async fn set(
        &self,
        key: &str,
        value: &ClassificationResult,
        ttl_secs: u64,
    ) -> Result<(), CacheError>;
}

/// Redis-backed cache on a multiplexed connection manager.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Connection(format!("{}: {}", url, e)))?;

        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl ClassificationCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<ClassificationResult>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;

        match raw {
            None => Ok(None),
            Some(json) => match serde_json::from_str(&json) {
                Ok(result) => Ok(Some(result)),
                Err(e) => {
                    // A stale value from an older format is a miss, not an
                    // outage.
                    tracing::warn!(key, error = %e, "discarding unreadable cached classification");
                    Ok(None)
                }
            },
        }
    }

    async fn set(
        &self,
        key: &str,
        value: &ClassificationResult,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string(value).map_err(|e| CacheError::Codec(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, json)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;

        // Expiry is separate from the write; the value stands even if the
        // TTL cannot be applied.
        if let Err(e) = conn.expire::<_, i64>(key, ttl_secs as i64).await {
            tracing::warn!(key, error = %e, "failed to set cache TTL");
        }

        Ok(())
    }
}

/// In-memory cache used by tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, ClassificationResult>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[async_trait]
impl ClassificationCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<ClassificationResult>, CacheError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: &ClassificationResult,
        _ttl_secs: u64,
    ) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
