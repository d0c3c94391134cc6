//! Text extraction: turns a résumé document into raw text for section parsing.

use std::panic::{catch_unwind, UnwindSafe};
use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

/// Extracts the text of every page of a PDF, trimmed.
///
/// A missing, unreadable or text-free document is an extraction failure: the
/// pipeline must not go on to parse garbage.
pub fn extract_text_from_pdf(path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::Extraction(format!(
            "document not found: {}",
            path.display()
        )));
    }

    let text = guard_extraction(path, || pdf_extract::extract_text(path))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Extraction(format!(
            "no text found in {}",
            path.display()
        )));
    }

    debug!("Extracted {} characters from {}", text.len(), path.display());
    Ok(text.to_string())
}

/// Runs an extractor, turning both its error and a panic inside it into
/// `AppError::Extraction`. The PDF parser panics on some malformed documents.
fn guard_extraction<F, E>(path: &Path, extract: F) -> Result<String, AppError>
where
    F: FnOnce() -> Result<String, E> + UnwindSafe,
    E: std::fmt::Display,
{
    match catch_unwind(extract) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::Extraction(format!(
            "could not read {}: {e}",
            path.display()
        ))),
        Err(_) => Err(AppError::Extraction(format!(
            "PDF parser crashed on {}",
            path.display()
        ))),
    }
}
