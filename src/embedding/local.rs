//! Production embedding runtime backed by fastembed.
//!
//! Model weights are loaded from disk (or downloaded into the cache
//! directory) when [`LocalEmbedder::load`] runs; loading doubles as the
//! boot-time warm-up. Inference is CPU-bound, so every call is pushed onto
//! the blocking pool to keep the async scheduler responsive.

use super::{EmbeddingError, EmbeddingRuntime};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Model name used when `HF_MODEL_NAME` is unset.
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

pub struct LocalEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

/// Map a Hugging Face model name onto the fastembed model set. Unknown
/// names fall back to the default MiniLM model.
fn resolve_model(name: &str) -> EmbeddingModel {
    match name {
        "sentence-transformers/all-MiniLM-L6-v2" => EmbeddingModel::AllMiniLML6V2,
        "sentence-transformers/all-MiniLM-L12-v2" => EmbeddingModel::AllMiniLML12V2,
        "BAAI/bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "BAAI/bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        other => {
            tracing::warn!(model = %other, "unknown embedding model name, using default");
            EmbeddingModel::AllMiniLML6V2
        }
    }
}

impl LocalEmbedder {
    /// Load the model and run one embedding through it so the first real
    /// request does not pay the initialisation cost.
    pub async fn load(
        cache_dir: Option<&Path>,
        model_name: &str,
    ) -> Result<Self, EmbeddingError> {
        let name = model_name.to_string();
        let dir: Option<PathBuf> = cache_dir.map(Path::to_path_buf);

        let (model, dimension) = tokio::task::spawn_blocking(move || {
            let mut options =
                InitOptions::new(resolve_model(&name)).with_show_download_progress(false);
            if let Some(dir) = dir {
                options = options.with_cache_dir(dir);
            }
            let model =
                TextEmbedding::try_new(options).map_err(|e| EmbeddingError::Model(e.to_string()))?;
            let warmup = model
                .embed(vec!["warm up"], None)
                .map_err(|e| EmbeddingError::Model(e.to_string()))?;
            let dimension = warmup
                .first()
                .map(Vec::len)
                .ok_or_else(|| EmbeddingError::Model("empty warm-up embedding".to_string()))?;
            Ok::<_, EmbeddingError>((model, dimension))
        })
        .await
        .map_err(|e| EmbeddingError::TaskAborted(e.to_string()))??;

        tracing::info!(model = %model_name, dimension, "embedding model loaded");

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

#[async_trait]
impl EmbeddingRuntime for LocalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        let mut vectors = tokio::task::spawn_blocking(move || {
            let model = model
                .lock()
                .map_err(|_| EmbeddingError::Model("embedding model lock poisoned".to_string()))?;
            model
                .embed(vec![text], None)
                .map_err(|e| EmbeddingError::Model(e.to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::TaskAborted(e.to_string()))??;

        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::Model("model returned no embedding".to_string()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
