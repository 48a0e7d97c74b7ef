//! Configuration constants.
//!
//! Defaults for the CLI and the library `Config`, plus limits used by the
//! ingestion and retrieval collaborators.

/// Maximum number of prompt rows processed per input file.
pub const MAX_ROWS_PROCESS: usize = 10;

/// Maximum accepted input file size in megabytes.
pub const MAX_UPLOAD_MB: u64 = 10;

/// Concurrent answer-engine requests.
/// Kept low: each request runs a web search on the provider side.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Per-request timeout for the answer engine, in seconds.
/// Web-search responses routinely take tens of seconds.
pub const PROVIDER_TIMEOUT_SECS: u64 = 90;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Appended to every prompt so the answer carries citations.
pub const PROMPT_SUFFIX: &str = " briefly and include sources citations.";

/// HTTP User-Agent sent to the answer engine.
pub const DEFAULT_USER_AGENT: &str = concat!("ai_visibility/", env!("CARGO_PKG_VERSION"));

// Retry strategy
/// Total attempts per prompt (initial attempt + retries)
pub const RETRY_MAX_ATTEMPTS: usize = 3;
/// Delay before the first retry in milliseconds; doubles on each further retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 1000;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 20;

pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
