use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Application-level error type.
///
/// Only extraction and embedding failures abort a run; everything the job
/// source encounters is recovered locally and never surfaces here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
