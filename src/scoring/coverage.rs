//! Coverage type: what kind of pages the engine cites.

use crate::models::{CoverageBucket, Source};

/// Keywords per bucket, checked in priority order against the lowercased URL.
const BUCKET_KEYWORDS: &[(CoverageBucket, &[&str])] = &[
    (CoverageBucket::Forum, &["forum", "reddit", "quora"]),
    (CoverageBucket::Docs, &["/docs", "/help"]),
    (CoverageBucket::Product, &["/product", "/buy", "/shop"]),
    (CoverageBucket::Blog, &["/blog", "/review"]),
];

const TOP_BUCKETS: usize = 2;

/// Classifies a source URL by substring match; the first matching bucket wins.
pub fn classify_source_url(url: &str) -> CoverageBucket {
    let url = url.to_lowercase();
    BUCKET_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| url.contains(keyword)))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(CoverageBucket::Other)
}

/// Summarizes the two most frequent buckets, e.g. `"Forum (50%)"` or
/// `"Product (67%), Blog (33%)"`. Returns `"N/A"` for an empty list.
///
/// Ties keep first-encountered order. Percentages are rounded half-to-even.
pub fn analyze_coverage_type(sources: &[Source]) -> String {
    if sources.is_empty() {
        return "N/A".to_string();
    }

    let mut counts: Vec<(CoverageBucket, usize)> = Vec::new();
    for source in sources {
        let bucket = classify_source_url(&source.url);
        match counts.iter_mut().find(|(seen, _)| *seen == bucket) {
            Some((_, count)) => *count += 1,
            None => counts.push((bucket, 1)),
        }
    }

    // sort_by is stable, which preserves first-encountered order on ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = sources.len() as f64;
    counts
        .iter()
        .take(TOP_BUCKETS)
        .map(|(bucket, count)| {
            let percent = (*count as f64 / total * 100.0).round_ties_even() as i64;
            format!("{bucket} ({percent}%)")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
