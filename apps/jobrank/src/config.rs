use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::embedding::EmbeddingBackend;

const DEFAULT_JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

/// Run configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_path: PathBuf,
    pub jsearch_api_key: String,
    pub jsearch_host: String,
    pub jsearch_base_url: String,
    pub job_query: String,
    pub job_location: String,
    pub max_jobs: usize,
    pub top_n: usize,
    pub pages_per_request: u32,
    pub jsearch_max_retries: u32,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_model: String,
    pub jobs_csv: PathBuf,
    pub ranked_csv: PathBuf,
    pub parsed_report: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let jsearch_host = optional_env("JSEARCH_HOST", DEFAULT_JSEARCH_HOST);
        let jsearch_base_url = std::env::var("JSEARCH_BASE_URL")
            .unwrap_or_else(|_| format!("https://{jsearch_host}"));

        Ok(Config {
            resume_path: PathBuf::from(require_env("RESUME_PATH")?),
            jsearch_api_key: require_env("JSEARCH_API_KEY")?,
            jsearch_host,
            jsearch_base_url,
            job_query: optional_env("JOB_QUERY", "data scientist"),
            job_location: optional_env("JOB_LOCATION", "New York"),
            max_jobs: parsed_env("MAX_JOBS", 50)?,
            top_n: parsed_env("TOP_N", 50)?,
            pages_per_request: parsed_env("PAGES_PER_REQUEST", 1)?,
            jsearch_max_retries: parsed_env("JSEARCH_MAX_RETRIES", 0)?,
            embedding_backend: parsed_env("EMBEDDING_BACKEND", EmbeddingBackend::FastEmbed)?,
            embedding_model: optional_env("EMBEDDING_MODEL", "all-MiniLM-L6-v2"),
            jobs_csv: PathBuf::from(optional_env("JOBS_CSV", "jsearch_jobs_data.csv")),
            ranked_csv: PathBuf::from(optional_env("RANKED_CSV", "ranked_jobs.csv")),
            parsed_report: PathBuf::from(optional_env("PARSED_REPORT", "parsed_resume.txt")),
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, std::env::var(key).ok().as_deref(), default)
}

/// Parses an optional raw value, falling back to `default` when absent or blank.
fn parse_value<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_uses_default_when_absent() {
        assert_eq!(parse_value::<usize>("TOP_N", None, 50).unwrap(), 50);
        assert_eq!(parse_value::<usize>("TOP_N", Some("  "), 50).unwrap(), 50);
    }

    #[test]
    fn test_parse_value_parses_number() {
        assert_eq!(parse_value::<usize>("MAX_JOBS", Some(" 25 "), 50).unwrap(), 25);
    }

    #[test]
    fn test_parse_value_error_names_variable() {
        let err = parse_value::<usize>("MAX_JOBS", Some("lots"), 50).unwrap_err();
        assert!(format!("{err:#}").contains("MAX_JOBS"));
    }

    #[test]
    fn test_parse_value_backend() {
        let backend = parse_value("EMBEDDING_BACKEND", Some("constant"), EmbeddingBackend::FastEmbed)
            .unwrap();
        assert_eq!(backend, EmbeddingBackend::Constant);
    }
}
