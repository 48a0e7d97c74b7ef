//! ai_visibility library: AI answer-engine visibility scoring
//!
//! For each (country, prompt, website) row of an input spreadsheet, this library
//! asks an AI answer engine the prompt, takes the ranked list of sources it
//! cites, and scores how visible the website's domain is among them. Results
//! are written as a CSV report.
//!
//! The scoring engine ([`scoring`]) is pure and can be used on its own:
//!
//! ```
//! use ai_visibility::models::Source;
//! use ai_visibility::scoring::calculate_query_metrics;
//!
//! let sources = vec![Source::new("https://www.example.com/docs/start")];
//! let record = calculate_query_metrics(&sources, "example.com", "UK");
//! assert_eq!(record.aiv_score, 84.0);
//! assert_eq!(record.coverage_type, "Docs (100%)");
//! ```
//!
//! The full pipeline runs through [`run_report`]:
//!
//! ```no_run
//! use ai_visibility::{run_report, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: PathBuf::from("prompts.csv"),
//!     output: Some(PathBuf::from("report.csv")),
//!     api_key: std::env::var("OPENAI_API_KEY").ok(),
//!     ..Default::default()
//! };
//!
//! let summary = run_report(config).await?;
//! println!("Scored {} prompts", summary.total_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! `run_report` requires a Tokio runtime. The scoring functions do not.

#![warn(missing_docs)]

mod app;
#[allow(missing_docs)]
pub mod config;
pub mod domain;
#[allow(missing_docs)]
pub mod error_handling;
pub mod export;
pub mod initialization;
#[allow(missing_docs)]
pub mod input;
#[allow(missing_docs)]
pub mod models;
#[allow(missing_docs)]
pub mod provider;
pub mod scoring;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ReportFormat};
pub use run::{run_report, score_rows, ReportSummary};

// Internal run module (contains the report pipeline)
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{debug, info};

    use crate::app::{log_progress, print_error_statistics};
    use crate::config::Config;
    use crate::error_handling::{ProcessingStats, WarningType};
    use crate::export::export_report;
    use crate::initialization::{init_client, init_semaphore};
    use crate::input::{read_prompt_rows, PromptRow};
    use crate::models::MetricsRecord;
    use crate::provider::{FixtureProvider, OpenAiProvider, SourceProvider};
    use crate::scoring::calculate_query_metrics;

    /// Results of a report run.
    #[derive(Debug, Clone)]
    pub struct ReportSummary {
        /// Number of prompt rows scored
        pub total_rows: usize,
        /// Rows where the target domain was cited at least once
        pub rows_with_mentions: usize,
        /// Rows whose retrieval failed and were scored with no sources
        pub failed_retrievals: usize,
        /// Input rows dropped for an empty cell or unusable website
        pub skipped_rows: usize,
        /// Usable rows not processed because of the row limit
        pub rows_over_limit: usize,
        /// Report path, or None when the report went to stdout
        pub output: Option<PathBuf>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the report pipeline with the provided configuration.
    ///
    /// Reads the prompt rows, fetches the cited sources for each prompt (from
    /// the answer engine, or from `config.fixtures`), scores every row and
    /// writes the report.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is incomplete (e.g. no API key and no fixtures)
    /// - The input file cannot be read or lacks required columns
    /// - The fixture file or HTTP client cannot be initialized
    /// - The report cannot be written
    ///
    /// A failed retrieval for an individual prompt is not an error; that row is
    /// scored with an empty source list and counted in `failed_retrievals`.
    pub async fn run_report(config: Config) -> Result<ReportSummary> {
        config.validate().context("Invalid configuration")?;
        let start_time = Instant::now();

        let ingest = read_prompt_rows(&config.file, config.max_rows, config.max_upload_mb)
            .with_context(|| format!("Failed to read prompts from {}", config.file.display()))?;
        let rows_over_limit = ingest.usable_rows - ingest.rows.len();
        info!(
            "Read {} prompt rows from {} ({} skipped, {} over the limit of {})",
            ingest.rows.len(),
            config.file.display(),
            ingest.skipped_rows,
            rows_over_limit,
            config.max_rows
        );

        let stats = ProcessingStats::new();
        stats.add_warning(WarningType::RowSkipped, ingest.skipped_rows);
        stats.add_warning(WarningType::RowLimitExceeded, rows_over_limit);

        let records = match config.fixtures.as_deref() {
            Some(path) => {
                info!("Using offline sources from {}", path.display());
                let provider = FixtureProvider::from_path(path).with_context(|| {
                    format!("Failed to load fixtures from {}", path.display())
                })?;
                score_rows(&ingest.rows, &provider, config.max_concurrency, &stats).await
            }
            None => {
                let client = init_client(&config).context("Failed to initialize HTTP client")?;
                let provider = OpenAiProvider::new(client, &config)
                    .context("Failed to initialize answer engine client")?;
                info!("Querying {} with model {}", config.api_base, config.model);
                score_rows(&ingest.rows, &provider, config.max_concurrency, &stats).await
            }
        };

        let written = export_report(&records, config.format, config.output.as_deref())?;
        debug!("Wrote {} report rows", written);

        print_error_statistics(&stats);

        Ok(ReportSummary {
            total_rows: records.len(),
            rows_with_mentions: records.iter().filter(|r| r.mentions_count > 0).count(),
            failed_retrievals: stats.total_errors(),
            skipped_rows: ingest.skipped_rows,
            rows_over_limit,
            output: config.output.clone(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Fetches sources for every row and scores it, returning records in row order.
    ///
    /// At most `max_concurrency` retrievals are in flight at once. Rows are
    /// independent, so completion order does not affect the result.
    pub async fn score_rows<P: SourceProvider>(
        rows: &[PromptRow],
        provider: &P,
        max_concurrency: usize,
        stats: &ProcessingStats,
    ) -> Vec<MetricsRecord> {
        let semaphore = init_semaphore(max_concurrency.max(1));
        let completed = AtomicUsize::new(0);
        let start_time = Instant::now();

        let mut tasks: FuturesUnordered<_> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let semaphore = &semaphore;
                let completed = &completed;
                async move {
                    // Permit is dropped when the row is scored
                    let _permit = semaphore.acquire().await.ok();

                    let retrieval = provider.fetch_sources(&row.prompt).await;
                    match &retrieval.error {
                        Some((error_type, _)) => stats.increment_error(*error_type),
                        None if retrieval.sources.is_empty() => {
                            stats.increment_warning(WarningType::NoSourcesReturned)
                        }
                        None => {}
                    }

                    let record =
                        calculate_query_metrics(&retrieval.sources, &row.target_domain, &row.country);
                    debug!(
                        "Row {} ({:?}): {} sources, AIV-Score {:.1}",
                        row.line, row.prompt, record.total_sources, record.aiv_score
                    );
                    completed.fetch_add(1, Ordering::SeqCst);
                    (index, record)
                }
            })
            .collect();

        let mut scored = Vec::with_capacity(rows.len());
        while let Some(result) = tasks.next().await {
            scored.push(result);
            log_progress(start_time, &completed, rows.len());
        }

        scored.sort_by_key(|(index, _)| *index);
        scored.into_iter().map(|(_, record)| record).collect()
    }
}
