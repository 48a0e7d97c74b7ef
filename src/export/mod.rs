//! Report export.
//!
//! Writes the per-prompt `MetricsRecord`s as a CSV report with a fixed header
//! or as JSONL.

mod csv;
mod jsonl;
mod writer;

use anyhow::{Context, Result};
use std::path::Path;

pub use self::csv::{write_report_csv, REPORT_COLUMNS};
pub use self::jsonl::write_report_jsonl;

use crate::config::ReportFormat;
use crate::models::MetricsRecord;

/// Writes `records` to `output`, or to stdout if `output` is None.
///
/// # Returns
///
/// Returns the number of records exported, or an error if the output cannot be
/// created or written.
pub fn export_report(
    records: &[MetricsRecord],
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<usize> {
    let sink = writer::open_output(output)?;
    let written = match format {
        ReportFormat::Csv => write_report_csv(records, sink),
        ReportFormat::Jsonl => write_report_jsonl(records, sink),
    };
    written.with_context(|| match output {
        Some(path) => format!("Failed to write report to {}", path.display()),
        None => "Failed to write report to stdout".to_string(),
    })
}
