//! End-of-run statistics.

use log::{info, warn};
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats, WarningType};

/// Logs failed retrievals and warnings, one line per non-zero counter.
///
/// Failed retrievals are logged at `warn`: those prompts were scored as if the
/// engine cited nothing, so their rows under-report visibility.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let failed = breakdown(ErrorType::iter().map(|e| (e.as_str(), stats.get_error_count(e))));
    if !failed.is_empty() {
        warn!(
            "{} prompt(s) scored without sources after failed retrieval:",
            stats.total_errors()
        );
        for line in &failed {
            warn!("   {line}");
        }
    }

    let warnings = breakdown(WarningType::iter().map(|w| (w.as_str(), stats.get_warning_count(w))));
    if !warnings.is_empty() {
        info!("Warnings ({} total):", stats.total_warnings());
        for line in &warnings {
            info!("   {line}");
        }
    }
}

fn breakdown<'a>(counts: impl Iterator<Item = (&'a str, usize)>) -> Vec<String> {
    counts
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| format!("{label}: {count}"))
        .collect()
}
