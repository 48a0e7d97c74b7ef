//! Competitor strength and the displayed competitor list.

use crate::domain::{normalize_given_domain, normalize_source_url};
use crate::models::{Source, StrengthLabel};

use super::round_to;

/// Number of competitor ranks averaged by default.
pub const DEFAULT_COMPETITOR_SAMPLE: usize = 3;

/// Only the top of the source list feeds the competitor column.
const COMPETITOR_SCAN_WINDOW: usize = 5;
const MAX_DISPLAYED_COMPETITORS: usize = 3;

/// Estimates competitive pressure from the first `k` non-target sources.
///
/// Returns the mean rank of those sources (rounded to two decimals) and its
/// label. A lower mean means competitors sit higher in the answer. Sources whose
/// URL does not normalize to a domain are skipped. Returns
/// `(None, StrengthLabel::NoCompetitors)` when nothing qualifies.
pub fn calculate_competitor_strength(
    sources: &[Source],
    target_domain: &str,
    k: usize,
) -> (Option<f64>, StrengthLabel) {
    let target = normalize_given_domain(target_domain);
    let k = k.max(1);

    let ranks: Vec<usize> = sources
        .iter()
        .enumerate()
        .filter(|(_, source)| {
            let domain = normalize_source_url(source.url.as_str());
            !domain.is_empty() && domain != target
        })
        .map(|(index, _)| index + 1)
        .take(k)
        .collect();

    if ranks.is_empty() {
        return (None, StrengthLabel::NoCompetitors);
    }

    let avg_rank = ranks.iter().sum::<usize>() as f64 / ranks.len() as f64;
    let label = if avg_rank <= 2.0 {
        StrengthLabel::Strong
    } else if avg_rank <= 3.5 {
        StrengthLabel::Moderate
    } else {
        StrengthLabel::Weak
    };

    (Some(round_to(avg_rank, 2)), label)
}

/// Distinct competitor domains among the first five sources, at most three.
pub fn top_competitors(sources: &[Source], target_domain: &str) -> Vec<String> {
    let target = normalize_given_domain(target_domain);
    let mut competitors: Vec<String> = Vec::new();

    for source in sources.iter().take(COMPETITOR_SCAN_WINDOW) {
        let domain = normalize_source_url(source.url.as_str());
        if !domain.is_empty() && domain != target && !competitors.contains(&domain) {
            competitors.push(domain);
        }
    }

    competitors.truncate(MAX_DISPLAYED_COMPETITORS);
    competitors
}
