//! Embedding providers: the single seam between ranking and any concrete model.
//!
//! Every consumer takes `&dyn EmbeddingProvider` and treats all implementations
//! the same way. Backend selection happens once, in the pipeline.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

pub mod constant;
pub mod fastembed;

/// A fixed-length embedding. All vectors compared within one run come from
/// the same provider and share its dimensionality.
pub type EmbeddingVector = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Unknown embedding model '{0}'")]
    UnknownModel(String),

    #[error("Model initialisation failed: {0}")]
    Init(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Embedding worker failed: {0}")]
    Worker(String),

    #[error("Provider returned no embedding")]
    EmptyResponse,

    #[error("Provider returned {actual} embeddings for {expected} texts")]
    BatchSizeMismatch { expected: usize, actual: usize },
}

/// Text-to-vector capability with a single and a batch operation.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds many texts in one call. Output position `i` belongs to input
    /// position `i`. Blank texts are embedded as-is.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError>;

    /// Embeds a single text. Blank or whitespace-only text yields `None`
    /// rather than a meaningless vector.
    async fn embed_one(&self, text: &str) -> Result<Option<EmbeddingVector>, EmbeddingError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .into_iter()
            .next()
            .map(Some)
            .ok_or(EmbeddingError::EmptyResponse)
    }
}

/// Which provider the pipeline builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    FastEmbed,
    Constant,
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fastembed" | "model" => Ok(EmbeddingBackend::FastEmbed),
            "constant" | "test" => Ok(EmbeddingBackend::Constant),
            other => Err(format!(
                "unknown embedding backend '{other}' (expected 'fastembed' or 'constant')"
            )),
        }
    }
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::FastEmbed => f.write_str("fastembed"),
            EmbeddingBackend::Constant => f.write_str("constant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes the text length so single and batch paths can be compared.
    struct LengthProvider;

    #[async_trait]
    impl EmbeddingProvider for LengthProvider {
        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }
    }

    struct SilentProvider;

    #[async_trait]
    impl EmbeddingProvider for SilentProvider {
        async fn embed_batch(
            &self,
            _texts: &[String],
        ) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_embed_one_skips_blank_text() {
        let provider = LengthProvider;
        assert_eq!(provider.embed_one("").await.unwrap(), None);
        assert_eq!(provider.embed_one("   \n\t").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_embed_one_matches_batch_of_one() {
        let provider = LengthProvider;
        let single = provider.embed_one("rust engineer").await.unwrap().unwrap();
        let batch = provider
            .embed_batch(&["rust engineer".to_string()])
            .await
            .unwrap();
        assert_eq!(batch[0], single);
    }

    #[tokio::test]
    async fn test_embed_one_empty_batch_response_is_error() {
        let err = SilentProvider.embed_one("text").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::EmptyResponse));
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(EmbeddingBackend::FastEmbed.to_string(), "fastembed");
        assert_eq!(EmbeddingBackend::Constant.to_string(), "constant");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("FastEmbed".parse::<EmbeddingBackend>(), Ok(EmbeddingBackend::FastEmbed));
        assert_eq!("constant".parse::<EmbeddingBackend>(), Ok(EmbeddingBackend::Constant));
        assert!("openai".parse::<EmbeddingBackend>().is_err());
    }
}
