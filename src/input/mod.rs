//! Prompt spreadsheet ingestion.
//!
//! Reads `Country`, `Prompt` and `Website` columns from a CSV or TSV file,
//! accepting a few header aliases (English, Russian, Ukrainian), and turns each
//! usable row into a [`PromptRow`] with a normalized target domain.

use std::path::Path;

use log::{debug, warn};

use crate::domain::normalize_source_url;
use crate::error_handling::InputError;

const COUNTRY: &str = "Country";
const PROMPT: &str = "Prompt";
const WEBSITE: &str = "Website";

/// One usable input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRow {
    /// 1-based position among data rows in the input file
    pub line: usize,
    pub country: String,
    pub prompt: String,
    /// Website cell as written in the file
    pub website: String,
    /// Website cell after URL normalization; never empty
    pub target_domain: String,
}

/// Result of reading an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Rows to process, at most the row limit
    pub rows: Vec<PromptRow>,
    /// Usable rows before the row limit was applied
    pub usable_rows: usize,
    /// Data rows dropped for an empty cell or an unusable website
    pub skipped_rows: usize,
}

/// Reads and normalizes prompt rows from `path`.
///
/// The delimiter follows the extension (`.csv` comma, `.tsv` tab). Header
/// cells are trimmed and matched case-insensitively against the known aliases.
/// Rows with an empty required cell, or whose website does not normalize to a
/// domain, are dropped. Only the first `max_rows` usable rows are kept.
///
/// # Errors
///
/// - `InputError::UnsupportedFormat` for any other extension
/// - `InputError::TooLarge` when the file exceeds `max_upload_mb`
/// - `InputError::MissingColumns` when a required column has no matching header
/// - `InputError::Io` / `InputError::Csv` for unreadable or malformed files
pub fn read_prompt_rows(
    path: &Path,
    max_rows: usize,
    max_upload_mb: u64,
) -> Result<IngestReport, InputError> {
    let delimiter = delimiter_for(path)?;
    let content = std::fs::read(path)?;
    validate_file_size(content.len(), max_upload_mb)?;
    parse_prompt_rows(&content, delimiter, max_rows)
}

/// Parses prompt rows from in-memory delimited text.
pub fn parse_prompt_rows(
    content: &[u8],
    delimiter: u8,
    max_rows: usize,
) -> Result<IngestReport, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    let mut usable_rows = 0;
    let mut skipped_rows = 0;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 1;
        let cell = |column: usize| record.get(column).unwrap_or_default().trim().to_string();

        let (country, prompt, website) = (
            cell(columns.country),
            cell(columns.prompt),
            cell(columns.website),
        );
        if country.is_empty() || prompt.is_empty() || website.is_empty() {
            debug!("Skipping row {line}: empty required cell");
            skipped_rows += 1;
            continue;
        }

        let target_domain = normalize_source_url(website.as_str());
        if target_domain.is_empty() {
            warn!("Skipping row {line}: cannot extract a domain from {website:?}");
            skipped_rows += 1;
            continue;
        }

        usable_rows += 1;
        if rows.len() < max_rows {
            rows.push(PromptRow {
                line,
                country,
                prompt,
                website,
                target_domain,
            });
        }
    }

    if usable_rows > rows.len() {
        warn!(
            "Input has {} usable rows, processing only the first {}",
            usable_rows,
            rows.len()
        );
    }

    Ok(IngestReport {
        rows,
        usable_rows,
        skipped_rows,
    })
}

/// Rejects uploads larger than `max_size_mb` megabytes.
pub fn validate_file_size(len_bytes: usize, max_size_mb: u64) -> Result<(), InputError> {
    let size_mb = len_bytes as f64 / (1024.0 * 1024.0);
    if size_mb > max_size_mb as f64 {
        return Err(InputError::TooLarge {
            size_mb,
            max_mb: max_size_mb,
        });
    }
    Ok(())
}

fn delimiter_for(path: &Path) -> Result<u8, InputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(b','),
        "tsv" => Ok(b'\t'),
        _ => Err(InputError::UnsupportedFormat(extension)),
    }
}

/// Maps a header cell to its canonical column name.
fn canonical_column(header: &str) -> Option<&'static str> {
    match header.trim().trim_start_matches('\u{feff}').to_lowercase().as_str() {
        "country" | "страна" => Some(COUNTRY),
        "prompt" | "query" | "запрос" | "запит" => Some(PROMPT),
        "website" | "domain" | "домен" | "сайт" => Some(WEBSITE),
        _ => None,
    }
}

struct ColumnIndex {
    country: usize,
    prompt: usize,
    website: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, InputError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| canonical_column(header) == Some(name))
        };

        match (find(COUNTRY), find(PROMPT), find(WEBSITE)) {
            (Some(country), Some(prompt), Some(website)) => Ok(Self {
                country,
                prompt,
                website,
            }),
            (country, prompt, website) => {
                let missing = [(COUNTRY, country), (PROMPT, prompt), (WEBSITE, website)]
                    .into_iter()
                    .filter(|(_, index)| index.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(InputError::MissingColumns(missing))
            }
        }
    }
}
