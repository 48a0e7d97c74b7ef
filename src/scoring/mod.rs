//! Visibility scoring engine.
//!
//! Turns the ranked source list cited for one prompt into a [`MetricsRecord`]:
//! - `calculate_aiv_score()` / `aiv_level()` - composite visibility score and band
//! - `calculate_competitor_strength()` - mean rank of the top non-target sources
//! - `analyze_coverage_type()` - content-type breakdown of the cited pages
//! - `calculate_query_metrics()` - all of the above as one report row
//!
//! Every function here is pure. Source URLs go through the full
//! [`normalize_source_url`](crate::domain::normalize_source_url) rule while the
//! target domain is only lowercased, so a target must be extracted before it
//! reaches this module.

mod aiv;
mod competitors;
mod coverage;

pub use aiv::{aiv_level, calculate_aiv_score, recommendation_label};
pub use competitors::{calculate_competitor_strength, top_competitors, DEFAULT_COMPETITOR_SAMPLE};
pub use coverage::{analyze_coverage_type, classify_source_url};

use crate::domain::normalize_given_domain;
use crate::models::{MetricsRecord, Source};

/// Scores one prompt and builds its report row.
///
/// `target_domain` is lowercased, not URL-parsed. An empty target never matches
/// any source.
///
/// # Examples
///
/// ```
/// use ai_visibility::models::Source;
/// use ai_visibility::scoring::calculate_query_metrics;
///
/// let sources = vec![
///     Source::new("amazon.com/x"),
///     Source::new("ebay.com/y"),
///     Source::new("amazon.com/z"),
/// ];
/// let record = calculate_query_metrics(&sources, "amazon.com", "UK");
/// assert_eq!(record.mentions_count, 2);
/// assert_eq!(record.best_rank, Some(1));
/// assert_eq!(record.competitors, vec!["ebay.com".to_string()]);
/// ```
pub fn calculate_query_metrics(
    sources: &[Source],
    target_domain: &str,
    country: &str,
) -> MetricsRecord {
    let target = normalize_given_domain(target_domain);

    let ranks = aiv::target_ranks(sources, &target);
    let mentions_count = ranks.len();
    let best_rank = ranks.first().copied();

    let aiv_score = calculate_aiv_score(sources, &target);
    let (competitor_strength_index, competitor_strength_label) =
        calculate_competitor_strength(sources, &target, DEFAULT_COMPETITOR_SAMPLE);

    MetricsRecord {
        country: country.to_string(),
        recommendation: recommendation_label(mentions_count),
        best_rank,
        best_rank_explanation: match best_rank {
            Some(rank) => format!("Target domain appears at #{rank}"),
            None => "Not visible".to_string(),
        },
        aiv_score,
        aiv_level: aiv_level(aiv_score),
        mentions_count,
        competitors: top_competitors(sources, &target),
        competitor_strength_index,
        competitor_strength_label,
        coverage_type: analyze_coverage_type(sources),
        total_sources: sources.len(),
        target_domain: target,
    }
}

/// Rounds half-to-even at the given number of decimals.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
