//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ai_visibility` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ai_visibility::config::Opt;
use ai_visibility::initialization::init_logger_with;
use ai_visibility::{run_report, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // OPENAI_API_KEY may live in a .env file next to the input or the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::from(Opt::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_report(config).await {
        Ok(summary) => {
            // stdout may carry the report itself, so the summary goes to stderr
            eprintln!(
                "✅ Scored {} prompt{} ({} with mentions, {} failed retrievals) in {:.1}s",
                summary.total_rows,
                if summary.total_rows == 1 { "" } else { "s" },
                summary.rows_with_mentions,
                summary.failed_retrievals,
                summary.elapsed_seconds
            );
            if let Some(path) = &summary.output {
                eprintln!("Report saved in {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ai_visibility error: {:#}", e);
            process::exit(1);
        }
    }
}
