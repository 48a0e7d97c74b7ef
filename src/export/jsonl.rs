//! JSONL report export.
//!
//! Each line is one `MetricsRecord` as a JSON object, keyed by the same column
//! names as the CSV report. Handy for piping to `jq`.

use anyhow::Result;
use std::io::Write;

use crate::models::MetricsRecord;

/// Writes one JSON object per record.
///
/// # Returns
///
/// Returns the number of records written.
pub fn write_report_jsonl<W: Write>(records: &[MetricsRecord], mut output: W) -> Result<usize> {
    for record in records {
        serde_json::to_writer(&mut output, record)?;
        output.write_all(b"\n")?;
    }
    output.flush()?;
    Ok(records.len())
}
