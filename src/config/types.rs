//! Configuration types and CLI options.
//!
//! `Opt` is the clap-derived command line; `Config` is the library-facing
//! configuration that `Opt` converts into. Library users build `Config`
//! directly and never touch clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_OPENAI_API_BASE, DEFAULT_OPENAI_MODEL, MAX_ROWS_PROCESS,
    MAX_UPLOAD_MB, PROVIDER_TIMEOUT_SECS, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Flat CSV with the fixed report header (default)
    Csv,
    /// One JSON object per prompt, same field names as the CSV header
    Jsonl,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Query the answer engine for every row and write the report to a file
/// OPENAI_API_KEY=... ai_visibility prompts.csv --output report.csv
///
/// # Score pre-fetched sources offline
/// ai_visibility prompts.csv --fixtures sources.json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ai_visibility",
    version,
    about = "Scores how visible a website is in AI answer-engine citations."
)]
pub struct Opt {
    /// Input file with Country, Prompt and Website columns (.csv or .tsv)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Report output path (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Report format: csv|jsonl
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    pub format: ReportFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum number of prompt rows to process
    #[arg(long, default_value_t = MAX_ROWS_PROCESS)]
    pub max_rows: usize,

    /// Maximum accepted input file size in megabytes
    #[arg(long, default_value_t = MAX_UPLOAD_MB)]
    pub max_upload_mb: u64,

    /// Maximum concurrent answer-engine requests
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = PROVIDER_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Total attempts per prompt, including the first one
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS)]
    pub retry_attempts: usize,

    /// Answer-engine model
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub model: String,

    /// Answer-engine API key (required unless --fixtures is given)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Answer-engine API base URL
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_OPENAI_API_BASE)]
    pub api_base: String,

    /// JSON file mapping each prompt to its sources; skips the answer engine
    #[arg(long)]
    pub fixtures: Option<PathBuf>,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ai_visibility::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("prompts.csv"),
///     api_key: Some("sk-...".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Input file with prompt rows
    pub file: PathBuf,

    /// Report output path (stdout if None)
    pub output: Option<PathBuf>,

    /// Report format
    pub format: ReportFormat,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Maximum number of prompt rows processed
    pub max_rows: usize,

    /// Maximum accepted input size in megabytes
    pub max_upload_mb: u64,

    /// Maximum concurrent answer-engine requests
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Total attempts per prompt (initial attempt + retries)
    pub retry_attempts: usize,

    /// Delay before the first retry in milliseconds
    pub retry_initial_delay_ms: u64,

    /// Answer-engine model
    pub model: String,

    /// Answer-engine API key
    pub api_key: Option<String>,

    /// Answer-engine API base URL
    pub api_base: String,

    /// Offline prompt-to-sources fixture file
    pub fixtures: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("prompts.csv"),
            output: None,
            format: ReportFormat::Csv,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_rows: MAX_ROWS_PROCESS,
            max_upload_mb: MAX_UPLOAD_MB,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: PROVIDER_TIMEOUT_SECS,
            retry_attempts: RETRY_MAX_ATTEMPTS,
            retry_initial_delay_ms: RETRY_INITIAL_DELAY_MS,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            api_key: None,
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            fixtures: None,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            file: opt.file,
            output: opt.output,
            format: opt.format,
            log_level: opt.log_level,
            log_format: opt.log_format,
            max_rows: opt.max_rows,
            max_upload_mb: opt.max_upload_mb,
            max_concurrency: opt.max_concurrency,
            timeout_seconds: opt.timeout_seconds,
            retry_attempts: opt.retry_attempts,
            model: opt.model,
            api_key: opt.api_key.filter(|key| !key.trim().is_empty()),
            api_base: opt.api_base,
            fixtures: opt.fixtures,
            ..Default::default()
        }
    }
}

impl Config {
    /// Checks settings that would otherwise fail halfway through a run.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingApiKey` when no fixtures are given and no API key is set
    /// - `ConfigError::InvalidValue` for a zero concurrency, row limit or attempt count
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixtures.is_none() && self.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingApiKey);
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue("max_concurrency must be at least 1"));
        }
        if self.max_rows == 0 {
            return Err(ConfigError::InvalidValue("max_rows must be at least 1"));
        }
        if self.retry_attempts == 0 {
            return Err(ConfigError::InvalidValue("retry_attempts must be at least 1"));
        }
        Ok(())
    }
}
