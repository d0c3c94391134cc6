//! Pipeline: résumé → sections → résumé vector; search → jobs; rank → output.
//!
//! Steps run strictly in order. Extraction and embedding failures abort the
//! run; everything else degrades to partial or empty results with a warning.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::embedding::constant::ConstantEmbeddingProvider;
use crate::embedding::fastembed::FastEmbedProvider;
use crate::embedding::{EmbeddingBackend, EmbeddingProvider, EmbeddingVector};
use crate::errors::AppError;
use crate::extraction::extract_text_from_pdf;
use crate::jobs::models::JobRecord;
use crate::jobs::source::JobSearchClient;
use crate::ranking::ranker::rank_and_save;
use crate::resume::report::save_report;
use crate::resume::sections::{parse_sections, ResumeSections};

const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Builds the configured provider. The only place the backend is chosen.
pub fn build_provider(config: &Config) -> Result<Box<dyn EmbeddingProvider>, AppError> {
    let provider: Box<dyn EmbeddingProvider> = match config.embedding_backend {
        EmbeddingBackend::FastEmbed => Box::new(FastEmbedProvider::new(&config.embedding_model)?),
        EmbeddingBackend::Constant => Box::new(ConstantEmbeddingProvider::default()),
    };
    info!("Embedding provider: {}", config.embedding_backend);
    Ok(provider)
}

/// Text embedded for the résumé: the recombined sections, or the raw text
/// when no section header was recognised.
pub fn resume_embedding_text(sections: &ResumeSections, raw_text: &str) -> String {
    if sections.is_empty() {
        warn!("No resume sections recognised; embedding the full extracted text");
        raw_text.to_string()
    } else {
        sections.full_text()
    }
}

/// Embeds the résumé. Blank text has no embedding and is an extraction failure.
pub async fn embed_resume(
    text: &str,
    provider: &dyn EmbeddingProvider,
) -> Result<EmbeddingVector, AppError> {
    provider
        .embed_one(text)
        .await?
        .ok_or_else(|| AppError::Extraction("resume text is empty".to_string()))
}

/// Writes the parsed-sections report. A failed write is logged and the run
/// goes on; returns whether the report was written.
pub fn write_report(sections: &ResumeSections, path: &Path) -> bool {
    match save_report(sections, path) {
        Ok(()) => true,
        Err(e) => {
            error!("Could not save parsed resume to {}: {e}", path.display());
            false
        }
    }
}

/// Runs the whole pipeline once and returns the ranked jobs.
pub async fn run(config: &Config) -> Result<Vec<JobRecord>, AppError> {
    let raw_text = extract_text_from_pdf(&config.resume_path)?;

    let sections = parse_sections(&raw_text);
    if sections.is_empty() {
        warn!("No recognisable sections in {}", config.resume_path.display());
    } else {
        info!("Parsed {} resume sections", sections.len());
    }
    write_report(&sections, &config.parsed_report);

    let provider = build_provider(config)?;
    let resume_text = resume_embedding_text(&sections, &raw_text);
    let resume_vector = embed_resume(&resume_text, provider.as_ref()).await?;
    info!("Resume embedding created ({} dimensions)", resume_vector.len());

    let client = JobSearchClient::new(
        config.jsearch_api_key.clone(),
        config.jsearch_host.clone(),
        &config.jsearch_base_url,
    )?
    .with_pages_per_request(config.pages_per_request)
    .with_retries(config.jsearch_max_retries, RETRY_BASE_DELAY)
    .with_store(config.jobs_csv.clone());

    let outcome = client
        .fetch(&config.job_query, &config.job_location, config.max_jobs)
        .await;
    info!(
        "Job search for '{}' in '{}' stopped after {} pages: {:?}",
        config.job_query, config.job_location, outcome.pages_fetched, outcome.state
    );

    rank_and_save(
        &resume_vector,
        outcome.jobs,
        config.top_n,
        provider.as_ref(),
        &config.ranked_csv,
    )
    .await
}

/// One summary line per ranked job.
pub fn summary_lines(ranked: &[JobRecord]) -> Vec<String> {
    ranked
        .iter()
        .map(|job| {
            format!(
                "{} at {} ({}) -> Similarity: {:.4}",
                job.title,
                job.company,
                job.location,
                job.similarity_score.unwrap_or(0.0)
            )
        })
        .collect()
}
