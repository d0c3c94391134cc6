//! CSV persistence for job lists: the fetched jobs and the ranked output.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::models::JobRecord;

/// Canonical columns, in file order.
pub const JOB_COLUMNS: [&str; 6] = [
    "title",
    "company",
    "publisher",
    "employment_type",
    "description",
    "location",
];

pub const SCORE_COLUMN: &str = "similarity_score";

/// The rows of a loaded job file together with its header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTable {
    pub headers: Vec<String>,
    pub jobs: Vec<JobRecord>,
}

impl JobTable {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Writes one row per job, replacing the file.
///
/// The score column is present only when at least one job carries a score.
/// An empty job list produces a header-only file.
pub fn save_jobs(jobs: &[JobRecord], path: &Path) -> Result<(), AppError> {
    let with_score = jobs.iter().any(|j| j.similarity_score.is_some());

    let mut writer = csv::Writer::from_path(path)?;
    let mut headers: Vec<&str> = JOB_COLUMNS.to_vec();
    if with_score {
        headers.push(SCORE_COLUMN);
    }
    writer.write_record(&headers)?;

    for job in jobs {
        let mut row = vec![
            job.title.clone(),
            job.company.clone(),
            job.publisher.clone(),
            job.employment_type.clone(),
            job.description.clone(),
            job.location.clone(),
        ];
        if with_score {
            row.push(job.similarity_score.map(|s| s.to_string()).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    if jobs.is_empty() {
        warn!("No jobs to save; wrote header-only {}", path.display());
    } else {
        info!("Saved {} jobs to {}", jobs.len(), path.display());
    }
    Ok(())
}

/// Reads a job file back in row order.
///
/// Missing columns default to empty values. A missing or zero-length file is
/// an empty table; a malformed file is an error.
pub fn load_jobs(path: &Path) -> Result<JobTable, AppError> {
    let is_empty_file = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };
    if is_empty_file {
        warn!("{} missing or empty", path.display());
        return Ok(JobTable::default());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.iter().map(String::from).collect();
    let jobs = reader
        .deserialize::<JobRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(JobTable { headers, jobs })
}
