//! Model-backed provider: a local sentence-embedding model run through fastembed (ONNX).
//!
//! Inference is CPU-bound, so each batch runs on the blocking pool while the
//! model sits behind a mutex.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use super::{EmbeddingError, EmbeddingProvider, EmbeddingVector};

/// A supported model resolved from a configured name.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub model: EmbeddingModel,
    pub model_code: String,
    pub dimensions: usize,
}

/// Looks a model up by name. Accepts the enum name (`AllMiniLML6V2`), the
/// fastembed model code, or the bare Hugging Face name with or without its
/// organisation prefix (`all-MiniLM-L6-v2`, `sentence-transformers/all-MiniLM-L6-v2`).
pub fn resolve_model(name: &str) -> Result<ResolvedModel, EmbeddingError> {
    let wanted = name.trim().to_lowercase();
    let wanted_base = wanted.rsplit('/').next().unwrap_or(&wanted).to_string();
    let supported = TextEmbedding::list_supported_models();

    let exact = supported.iter().find(|info| {
        info.model_code.to_lowercase() == wanted
            || format!("{:?}", info.model).to_lowercase() == wanted
    });

    let by_base = || {
        supported.iter().find(|info| {
            let code = info.model_code.to_lowercase();
            let base = code.rsplit('/').next().unwrap_or(&code).to_string();
            base == wanted_base || base == format!("{wanted_base}-onnx")
        })
    };

    exact
        .or_else(by_base)
        .map(|info| ResolvedModel {
            model: info.model.clone(),
            model_code: info.model_code.clone(),
            dimensions: info.dim,
        })
        .ok_or_else(|| EmbeddingError::UnknownModel(name.to_string()))
}

pub struct FastEmbedProvider {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedProvider {
    /// Loads the named model, downloading it into the fastembed cache on first use.
    pub fn new(model_name: &str) -> Result<Self, EmbeddingError> {
        let resolved = resolve_model(model_name)?;
        let options = InitOptions::new(resolved.model.clone()).with_show_download_progress(false);

        let text_embedding =
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::Init(e.to_string()))?;

        info!(
            "Loaded embedding model {} ({} dimensions)",
            resolved.model_code, resolved.dimensions
        );

        Ok(Self {
            model: Arc::new(Mutex::new(text_embedding)),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();
        let expected = texts.len();

        let vectors = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|e| EmbeddingError::Worker(format!("model lock poisoned: {e}")))?;
            model
                .embed(texts, None)
                .map_err(|e| EmbeddingError::Inference(e.to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::Worker(e.to_string()))??;

        if vectors.len() != expected {
            return Err(EmbeddingError::BatchSizeMismatch {
                expected,
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }
}
