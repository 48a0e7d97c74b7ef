//! Error categorization and retry strategy.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::{ErrorType, ProviderError};
use crate::config::{HTTP_STATUS_TOO_MANY_REQUESTS, RETRY_MAX_DELAY_SECS};

/// Creates an exponential backoff retry strategy.
///
/// Yields one delay per retry: `initial_delay_ms`, then double the previous
/// delay, capped at `RETRY_MAX_DELAY_SECS`. The iterator has
/// `max_attempts - 1` items, so together with the initial attempt at most
/// `max_attempts` requests are made.
pub fn get_retry_strategy(
    max_attempts: usize,
    initial_delay_ms: u64,
) -> impl Iterator<Item = Duration> {
    // ExponentialBackoff yields base^n * factor; base 2 with factor d/2 gives d, 2d, 4d, ...
    ExponentialBackoff::from_millis(2)
        .factor((initial_delay_ms / 2).max(1))
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(max_attempts.saturating_sub(1))
}

/// Returns true for failures that may succeed on a later attempt.
///
/// Retried: timeouts, connection failures, 429 and 5xx responses.
/// Not retried: other 4xx responses, decode errors, fixture errors.
pub fn is_retriable(error: &ProviderError) -> bool {
    match error {
        ProviderError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        ProviderError::Status { status, .. } => {
            *status == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(status)
        }
        ProviderError::Decode(_) | ProviderError::FixtureIo(_) => false,
    }
}

/// Categorizes a `ProviderError` into an `ErrorType` for run statistics.
pub fn categorize_provider_error(error: &ProviderError) -> ErrorType {
    match error {
        ProviderError::Status { status, .. } => match *status {
            HTTP_STATUS_TOO_MANY_REQUESTS => ErrorType::ProviderTooManyRequests,
            401 | 403 => ErrorType::ProviderUnauthorized,
            400..=499 => ErrorType::ProviderClientError,
            500..=599 => ErrorType::ProviderServerError,
            _ => ErrorType::ProviderOtherError,
        },
        ProviderError::Request(e) if e.is_timeout() => ErrorType::ProviderTimeoutError,
        ProviderError::Request(e) if e.is_connect() => ErrorType::ProviderConnectError,
        ProviderError::Request(e) if e.is_decode() => ErrorType::ProviderDecodeError,
        ProviderError::Request(_) => ErrorType::ProviderOtherError,
        ProviderError::Decode(_) => ErrorType::ProviderDecodeError,
        ProviderError::FixtureIo(_) => ErrorType::ProviderOtherError,
    }
}
