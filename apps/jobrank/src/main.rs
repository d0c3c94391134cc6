mod config;
mod embedding;
mod errors;
mod extraction;
mod jobs;
mod pipeline;
mod ranking;
mod resume;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobrank v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Resume: {} | query: '{}' in '{}' | max_jobs={} top_n={} | backend: {}",
        config.resume_path.display(),
        config.job_query,
        config.job_location,
        config.max_jobs,
        config.top_n,
        config.embedding_backend
    );

    let ranked = match pipeline::run(&config).await {
        Ok(ranked) => ranked,
        Err(e) => {
            error!("Pipeline aborted: {e}");
            return Err(e.into());
        }
    };

    if ranked.is_empty() {
        info!("No matching jobs to report");
    } else {
        info!("Top matching jobs:");
        for line in pipeline::summary_lines(&ranked) {
            info!("{line}");
        }
    }
    info!("Ranked jobs written to {}", config.ranked_csv.display());

    Ok(())
}
