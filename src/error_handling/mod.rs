//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, ingestion and retrieval
//! - Processing statistics tracking (failed retrievals, warnings)
//! - Retry strategy configuration and retriability rules
//!
//! The scoring engine never fails, so nothing here concerns it.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_provider_error, get_retry_strategy, is_retriable};
pub use stats::ProcessingStats;
pub use types::{
    ConfigError, ErrorType, InitializationError, InputError, ProviderError, WarningType,
};
