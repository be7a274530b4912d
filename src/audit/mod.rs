//! Best-effort audit log of classification and routing outcomes.
//!
//! The orchestrator dispatches inserts fire-and-forget; a failing sink
//! never blocks or fails a request. There is no read path.

use crate::catalog::TaskCategory;
use crate::classifier::ClassificationSource;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Mutex;
use thiserror::Error;

/// Length of the stored prompt preview.
pub const PREVIEW_MAX_CHARS: usize = 200;

/// First 200 characters of a prompt, for the audit row.
pub fn preview(prompt: &str) -> String {
    prompt.chars().take(PREVIEW_MAX_CHARS).collect()
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit sink connection failed: {0}")]
    Connection(String),

    #[error("audit insert failed: {0}")]
    Insert(String),
}

/// One audit record. `created_at` is assigned by the database.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub prompt_hash: String,
    pub prompt_preview: String,
    pub category: TaskCategory,
    pub confidence: f64,
    pub source: ClassificationSource,
    pub model_used: String,
    pub cost_usd: f64,
    pub latency_ms: u64,
}

#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    async fn insert(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Production sink: one row per request in `classification_logs`.
pub struct PostgresAuditSink {
    pool: PgPool,
}

impl PostgresAuditSink {
    pub async fn connect(url: &str) -> Result<Self, AuditError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| AuditError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl AuditSink for PostgresAuditSink {
    async fn insert(&self, entry: AuditEntry) -> Result<(), AuditError> {
        sqlx::query(
            "INSERT INTO classification_logs \
             (prompt_hash, prompt_preview, category, confidence, source, model_used, cost_usd, latency_ms) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&entry.prompt_hash)
        .bind(&entry.prompt_preview)
        .bind(entry.category.as_str())
        .bind(entry.confidence)
        .bind(entry.source.as_str())
        .bind(&entry.model_used)
        .bind(entry.cost_usd)
        .bind(entry.latency_ms as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditError::Insert(e.to_string()))?;

        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit sink lock").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("audit sink lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn insert(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().expect("audit sink lock").push(entry);
        Ok(())
    }
}
