//! Job source: paginated JSearch client.
//!
//! Pages are requested from 1 upward until the limit is reached, a page comes
//! back empty, or a request fails. Remote failures never escape: whatever was
//! accumulated is returned. The retrieval loop is an explicit state machine
//! over `FetchState`.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::jobs::models::{JobRecord, RawJobItem, SearchResponse};
use crate::jobs::persistence::save_jobs;

const SEARCH_PATH: &str = "/search";
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Where the pagination loop is. Every non-accumulating state is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Accumulating { page: u32 },
    StoppedByLimit,
    StoppedByEmptyPage,
    StoppedByError(String),
}

/// Result of a fetch: the (possibly partial) records and why the loop stopped.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub jobs: Vec<JobRecord>,
    pub state: FetchState,
    pub pages_fetched: u32,
}

#[derive(Debug, Error)]
enum PageError {
    #[error("API request failed with status code {status}")]
    Status { status: u16 },

    #[error("API request error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the JSearch job-search API (RapidAPI).
#[derive(Clone)]
pub struct JobSearchClient {
    client: Client,
    api_key: String,
    api_host: String,
    url: String,
    pages_per_request: u32,
    max_retries: u32,
    retry_base_delay: Duration,
    store_path: Option<PathBuf>,
}

impl JobSearchClient {
    pub fn new(api_key: String, api_host: String, base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            api_host,
            url: format!("{}{SEARCH_PATH}", base_url.trim_end_matches('/')),
            pages_per_request: 1,
            max_retries: 0,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            store_path: None,
        })
    }

    /// Value sent as `num_pages` on every request.
    pub fn with_pages_per_request(mut self, pages: u32) -> Self {
        self.pages_per_request = pages.max(1);
        self
    }

    /// Retries 429 and 5xx responses with exponential backoff. Zero (the
    /// default) stops on the first non-success status.
    pub fn with_retries(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_base_delay = base_delay;
        self
    }

    /// Saves every fetched (unranked) list to this CSV before returning it.
    pub fn with_store(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    /// Fetches up to `max_results` jobs. Never fails; see `FetchOutcome::state`
    /// for why pagination stopped.
    pub async fn fetch(&self, query: &str, location: &str, max_results: usize) -> FetchOutcome {
        let mut jobs: Vec<JobRecord> = Vec::new();
        let mut pages_fetched = 0;
        let mut state = FetchState::Accumulating { page: 1 };

        while let FetchState::Accumulating { page } = state {
            if jobs.len() >= max_results {
                state = FetchState::StoppedByLimit;
                break;
            }

            state = match self.fetch_page(query, location, page).await {
                Ok(items) if items.is_empty() => {
                    warn!("No more jobs returned from API (page {page})");
                    FetchState::StoppedByEmptyPage
                }
                Ok(items) => {
                    pages_fetched += 1;
                    debug!("Page {page} returned {} jobs", items.len());
                    jobs.extend(items.into_iter().map(JobRecord::from));
                    if jobs.len() >= max_results {
                        FetchState::StoppedByLimit
                    } else {
                        FetchState::Accumulating { page: page + 1 }
                    }
                }
                Err(e) => {
                    warn!("{e}; keeping {} jobs fetched so far", jobs.len());
                    FetchState::StoppedByError(e.to_string())
                }
            };
        }

        jobs.truncate(max_results);

        if jobs.is_empty() {
            warn!("No jobs fetched from API");
        } else {
            info!("Fetched {} jobs over {pages_fetched} pages", jobs.len());
        }

        if let Some(path) = &self.store_path {
            if let Err(e) = save_jobs(&jobs, path) {
                error!("Could not save fetched jobs to {}: {e}", path.display());
            }
        }

        FetchOutcome {
            jobs,
            state,
            pages_fetched,
        }
    }

    /// Requests one page, retrying rate-limit and server errors when configured.
    async fn fetch_page(
        &self,
        query: &str,
        location: &str,
        page: u32,
    ) -> Result<Vec<RawJobItem>, PageError> {
        let params = [
            ("query", query.to_string()),
            ("location", location.to_string()),
            ("page", page.to_string()),
            ("num_pages", self.pages_per_request.to_string()),
        ];

        let mut attempt = 0;
        loop {
            let response = self
                .client
                .get(&self.url)
                .header("X-RapidAPI-Key", &self.api_key)
                .header("X-RapidAPI-Host", &self.api_host)
                .query(&params)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let body: SearchResponse = response.json().await?;
                return Ok(body.data);
            }

            let retryable = status.as_u16() == 429 || status.is_server_error();
            if !retryable || attempt >= self.max_retries {
                return Err(PageError::Status {
                    status: status.as_u16(),
                });
            }

            // Exponential backoff: base, 2x base, 4x base, ...
            let delay = self.retry_base_delay * 2u32.pow(attempt.min(16));
            attempt += 1;
            warn!(
                "Job search returned {status} for page {page}, retry {attempt}/{} after {}ms",
                self.max_retries,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }
}
