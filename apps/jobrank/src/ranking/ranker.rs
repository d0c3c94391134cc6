//! Ranker: scores jobs against the résumé vector and keeps the top N.
//!
//! Algorithm:
//! 1. Empty input returns immediately, without touching the provider
//! 2. One composite text per job (title, company, description)
//! 3. A single `embed_batch` call over all composites
//! 4. Cosine similarity per job, attached as `similarity_score`
//! 5. Stable sort by score descending (ties keep fetch order)
//! 6. Truncate to `top_n`

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::errors::AppError;
use crate::jobs::models::JobRecord;
use crate::jobs::persistence::save_jobs;
use crate::ranking::similarity::cosine_similarity;

/// Ranks `jobs` by similarity to `resume_vector` and returns at most `top_n`.
///
/// The provider is always injected; this function never builds one.
pub async fn rank_jobs(
    resume_vector: &[f32],
    jobs: Vec<JobRecord>,
    top_n: usize,
    provider: &dyn EmbeddingProvider,
) -> Result<Vec<JobRecord>, AppError> {
    if jobs.is_empty() {
        warn!("No jobs to rank");
        return Ok(Vec::new());
    }

    let texts: Vec<String> = jobs.iter().map(JobRecord::composite_text).collect();
    let vectors = provider.embed_batch(&texts).await?;

    if vectors.len() != jobs.len() {
        return Err(EmbeddingError::BatchSizeMismatch {
            expected: jobs.len(),
            actual: vectors.len(),
        }
        .into());
    }

    let mut ranked = Vec::with_capacity(jobs.len());
    for (mut job, vector) in jobs.into_iter().zip(vectors) {
        if vector.len() != resume_vector.len() {
            return Err(AppError::DimensionMismatch {
                expected: resume_vector.len(),
                actual: vector.len(),
            });
        }
        job.similarity_score = Some(cosine_similarity(resume_vector, &vector));
        ranked.push(job);
    }

    // `sort_by` is stable: equal scores keep their fetch order.
    ranked.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
    ranked.truncate(top_n);

    debug!(
        "Ranked {} jobs; best score {:?}",
        ranked.len(),
        ranked.first().and_then(|j| j.similarity_score)
    );
    Ok(ranked)
}

/// Ranks and writes the result to `output`. An empty result still produces a
/// header-only file so no stale ranking survives from an earlier run.
///
/// Only embedding failures are returned; a failed write is logged and the
/// ranked list is still handed back.
pub async fn rank_and_save(
    resume_vector: &[f32],
    jobs: Vec<JobRecord>,
    top_n: usize,
    provider: &dyn EmbeddingProvider,
    output: &Path,
) -> Result<Vec<JobRecord>, AppError> {
    let ranked = rank_jobs(resume_vector, jobs, top_n, provider).await?;
    info!("Kept top {} of requested {top_n}", ranked.len());
    save_ranked(&ranked, output);
    Ok(ranked)
}

/// Writes the ranked list, logging instead of failing. Returns whether the
/// file was written.
pub fn save_ranked(ranked: &[JobRecord], output: &Path) -> bool {
    match save_jobs(ranked, output) {
        Ok(()) => true,
        Err(e) => {
            error!("Could not save ranked jobs to {}: {e}", output.display());
            false
        }
    }
}

fn score_of(job: &JobRecord) -> f64 {
    job.similarity_score.unwrap_or(0.0)
}
