//! Error type definitions.
//!
//! This module defines the error and warning types used by the collaborators
//! around the scoring engine. Scoring itself has no error type.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid or incomplete configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set (pass --api-key or use --fixtures for an offline run)")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    InvalidValue(&'static str),
}

/// Errors reading the prompt spreadsheet.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file format: {0:?} (expected .csv or .tsv)")]
    UnsupportedFormat(String),

    #[error("Input file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("Input file is too large: {size_mb:.2} MB > {max_mb} MB")]
    TooLarge { size_mb: f64, max_mb: u64 },
}

/// Errors talking to the answer engine or loading offline fixtures.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure (timeout, connection, TLS, body read).
    #[error("Request to answer engine failed: {0}")]
    Request(#[from] ReqwestError),

    /// Non-success HTTP status from the answer engine.
    #[error("Answer engine returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON.
    #[error("Failed to decode answer engine response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read fixture file: {0}")]
    FixtureIo(#[from] std::io::Error),
}

/// Failed retrievals, counted per run.
///
/// A failed retrieval never aborts a run; the prompt is scored with an empty
/// source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    ProviderTimeoutError,
    ProviderConnectError,
    ProviderTooManyRequests,
    ProviderUnauthorized,
    ProviderClientError,
    ProviderServerError,
    ProviderDecodeError,
    ProviderOtherError,
}

/// Non-fatal conditions worth reporting at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// The engine answered but cited nothing.
    NoSourcesReturned,
    /// An input row was dropped (empty cell or unusable website).
    RowSkipped,
    /// Rows beyond the row limit were not processed.
    RowLimitExceeded,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ProviderTimeoutError => "Answer engine timeout",
            ErrorType::ProviderConnectError => "Answer engine connection error",
            ErrorType::ProviderTooManyRequests => "Answer engine rate limited (429)",
            ErrorType::ProviderUnauthorized => "Answer engine rejected credentials (401/403)",
            ErrorType::ProviderClientError => "Answer engine client error (4xx)",
            ErrorType::ProviderServerError => "Answer engine server error (5xx)",
            ErrorType::ProviderDecodeError => "Answer engine response decode error",
            ErrorType::ProviderOtherError => "Answer engine other error",
        }
    }
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::NoSourcesReturned => "No sources returned",
            WarningType::RowSkipped => "Input row skipped",
            WarningType::RowLimitExceeded => "Input rows over the row limit",
        }
    }
}
