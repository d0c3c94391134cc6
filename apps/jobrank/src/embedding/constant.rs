//! Deterministic provider: the same vector for every input.
//!
//! Makes ranking reproducible without model inference.

use async_trait::async_trait;

use super::{EmbeddingError, EmbeddingProvider, EmbeddingVector};

#[derive(Debug, Clone)]
pub struct ConstantEmbeddingProvider {
    vector: EmbeddingVector,
}

impl ConstantEmbeddingProvider {
    pub fn new(vector: EmbeddingVector) -> Self {
        Self { vector }
    }
}

impl Default for ConstantEmbeddingProvider {
    fn default() -> Self {
        Self::new(vec![1.0, 0.0, 0.0])
    }
}

#[async_trait]
impl EmbeddingProvider for ConstantEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        Ok(vec![self.vector.clone(); texts.len()])
    }
}
