//! Processing statistics tracking.
//!
//! Thread-safe counters for failed retrievals and non-fatal warnings during a
//! report run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, WarningType};

/// Thread-safe processing statistics tracker.
///
/// Every `ErrorType` and `WarningType` is registered at construction, so
/// concurrent retrieval futures can share one instance without locking.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            errors: ErrorType::iter()
                .map(|error| (error, AtomicUsize::new(0)))
                .collect(),
            warnings: WarningType::iter()
                .map(|warning| (warning, AtomicUsize::new(0)))
                .collect(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        self.add_error(error, 1);
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.add_warning(warning, 1);
    }

    pub fn add_warning(&self, warning: WarningType, count: usize) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(count, Ordering::Relaxed);
        } else {
            log::error!("Warning type {:?} is not registered in ProcessingStats", warning);
        }
    }

    fn add_error(&self, error: ErrorType, count: usize) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(count, Ordering::Relaxed);
        } else {
            log::error!("Error type {:?} is not registered in ProcessingStats", error);
        }
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failed retrievals across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    pub fn total_warnings(&self) -> usize {
        WarningType::iter().map(|w| self.get_warning_count(w)).sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
