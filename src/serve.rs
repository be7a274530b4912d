//! Composition and boot.
//!
//! Wires the collaborators together in dependency order: shared HTTP
//! client, embedding runtime (loading is the warm-up), vector store,
//! cache, audit sink, provider client, engine, then the axum server with
//! graceful shutdown. The service only starts listening once the
//! embedding model is warm and the collection exists.

use crate::api::{create_router, AppState};
use crate::audit::PostgresAuditSink;
use crate::classifier::{Classifier, QdrantStore, RedisCache, SemanticClassifier};
use crate::config::Config;
use crate::embedding::{EmbeddingRuntime, LocalEmbedder};
use crate::provider::create_provider;
use crate::router::RouterEngine;
use std::sync::Arc;
use tracing::info;

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(provider = %config.provider, port = config.port, "starting engine");

    let http_client = Arc::new(
        reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()?,
    );

    let embedder = Arc::new(
        LocalEmbedder::load(
            config.models_cache_dir.as_deref(),
            &config.embedding_model,
        )
        .await?,
    );
    let embedding_model = embedder.model_name().to_string();

    let store = Arc::new(QdrantStore::connect(&config.qdrant_url)?);
    let cache = Arc::new(RedisCache::connect(&config.redis_url).await?);
    let audit = Arc::new(PostgresAuditSink::connect(&config.database_url).await?);

    let classifier = Arc::new(SemanticClassifier::new(embedder, store, cache));
    classifier.ensure_collection().await?;

    let provider = create_provider(config.provider, config.api_key.clone(), http_client)?;
    let engine = Arc::new(RouterEngine::new(classifier, provider, audit));

    let state = Arc::new(AppState::new(engine, embedding_model));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down cleanly");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
