//! AIV score, level and recommendation label.

use crate::domain::{is_target_domain, normalize_given_domain, normalize_source_url};
use crate::models::{AivLevel, Source};

use super::round_to;

const INCLUSION_WEIGHT: f64 = 0.40;
const PROMINENCE_WEIGHT: f64 = 0.40;
const DEPTH_WEIGHT: f64 = 0.20;

/// Ranks past this point no longer shrink the prominence window.
const PROMINENCE_WINDOW: usize = 5;
/// Mentions beyond this count add no depth.
const DEPTH_SATURATION: usize = 5;

/// 1-based ranks of every source whose normalized domain is the target.
///
/// `target` must already be normalized with [`normalize_given_domain`].
pub(crate) fn target_ranks(sources: &[Source], target: &str) -> Vec<usize> {
    sources
        .iter()
        .enumerate()
        .filter(|(_, source)| is_target_domain(&normalize_source_url(source.url.as_str()), target))
        .map(|(index, _)| index + 1)
        .collect()
}

/// Computes the AIV visibility score for one prompt, rounded to one decimal.
///
/// ```text
/// score = 100 * (0.40 * inclusion + 0.40 * presence * prominence + 0.20 * depth)
/// ```
///
/// - `inclusion` is 1 when the engine cited anything at all
/// - `prominence = 1 - (best_rank - 1) / K` with `K = min(5, N)`
/// - `depth = min(mentions, 5) / 5`
///
/// Prominence is not clamped. With more than five sources a first mention past
/// rank 6 makes it negative, which can pull the score below the inclusion floor
/// and, far enough down the list, below zero.
pub fn calculate_aiv_score(sources: &[Source], target_domain: &str) -> f64 {
    let target = normalize_given_domain(target_domain);
    let total = sources.len();
    let window = if total > 0 {
        total.clamp(1, PROMINENCE_WINDOW)
    } else {
        1
    } as f64;

    let inclusion = if total > 0 { 1.0 } else { 0.0 };

    let ranks = target_ranks(sources, &target);
    let presence = if ranks.is_empty() { 0.0 } else { 1.0 };
    let prominence = match ranks.first() {
        Some(&best_rank) => 1.0 - (best_rank - 1) as f64 / window,
        None => 0.0,
    };
    let depth = ranks.len().min(DEPTH_SATURATION) as f64 / DEPTH_SATURATION as f64;

    let score = 100.0
        * (INCLUSION_WEIGHT * inclusion
            + PROMINENCE_WEIGHT * (presence * prominence)
            + DEPTH_WEIGHT * depth);

    round_to(score, 1)
}

/// Maps a score to its band. Each boundary belongs to the lower band.
pub fn aiv_level(score: f64) -> AivLevel {
    if score <= 30.0 {
        AivLevel::Low
    } else if score <= 60.0 {
        AivLevel::Medium
    } else if score <= 80.0 {
        AivLevel::High
    } else {
        AivLevel::Dominant
    }
}

/// Localized "recommended (n)" / "not recommended" tag for the report.
pub fn recommendation_label(mentions_count: usize) -> String {
    if mentions_count > 0 {
        format!("Рекомендується ({mentions_count})")
    } else {
        "Не рекомендується".to_string()
    }
}
