// Scoring engine tests.

use super::*;
use crate::models::{AivLevel, CoverageBucket, StrengthLabel};

fn sources(urls: &[&str]) -> Vec<Source> {
    urls.iter().map(|url| Source::new(*url)).collect()
}

#[test]
fn test_query_metrics_amazon_scenario() {
    let list = sources(&["amazon.com/x", "ebay.com/y", "amazon.com/z"]);
    let record = calculate_query_metrics(&list, "amazon.com", "UK");

    assert_eq!(record.country, "UK");
    assert_eq!(record.target_domain, "amazon.com");
    assert_eq!(record.mentions_count, 2);
    assert_eq!(record.best_rank, Some(1));
    assert_eq!(record.recommendation, "Рекомендується (2)");
    assert_eq!(record.best_rank_explanation, "Target domain appears at #1");
    assert_eq!(record.competitors, vec!["ebay.com".to_string()]);
    assert_eq!(record.aiv_score, 88.0);
    assert_eq!(record.aiv_level, AivLevel::Dominant);
    assert_eq!(record.competitor_strength_index, Some(2.0));
    assert_eq!(record.competitor_strength_label, StrengthLabel::Strong);
    assert_eq!(record.coverage_type, "Other (100%)");
    assert_eq!(record.total_sources, 3);
}

#[test]
fn test_query_metrics_empty_sources() {
    let record = calculate_query_metrics(&[], "example.com", "USA");

    assert_eq!(record.aiv_score, 0.0);
    assert_eq!(record.aiv_level, AivLevel::Low);
    assert_eq!(record.recommendation, "Не рекомендується");
    assert_eq!(record.best_rank, None);
    assert_eq!(record.best_rank_explanation, "Not visible");
    assert_eq!(record.mentions_count, 0);
    assert!(record.competitors.is_empty());
    assert_eq!(record.competitor_strength_index, None);
    assert_eq!(record.competitor_strength_label, StrengthLabel::NoCompetitors);
    assert_eq!(record.coverage_type, "N/A");
    assert_eq!(record.total_sources, 0);
}

#[test]
fn test_aiv_score_sole_source_at_rank_one() {
    // 100 * (0.4 + 0.4 * 1.0 + 0.2 * 0.2)
    let list = sources(&["https://www.target.com/page"]);
    assert_eq!(calculate_aiv_score(&list, "target.com"), 84.0);
}

#[test]
fn test_aiv_score_prominence_decays_with_rank() {
    // K = 5, prominence = 1 - 1/5
    let list = sources(&["a.com", "target.com", "b.com", "c.com", "d.com"]);
    assert_eq!(calculate_aiv_score(&list, "target.com"), 76.0);
}

#[test]
fn test_aiv_score_window_shrinks_with_few_sources() {
    // K = 2, prominence = 1 - 1/2
    let list = sources(&["a.com", "target.com"]);
    assert_eq!(calculate_aiv_score(&list, "target.com"), 64.0);
}

#[test]
fn test_aiv_score_absent_target_keeps_inclusion() {
    let list = sources(&["a.com", "b.com", "c.com", "d.com"]);
    let score = calculate_aiv_score(&list, "target.com");
    assert_eq!(score, 40.0);
    assert_eq!(aiv_level(score), AivLevel::Medium);
}

#[test]
fn test_aiv_score_depth_saturates_at_five_mentions() {
    let list = sources(&[
        "target.com/1",
        "target.com/2",
        "target.com/3",
        "target.com/4",
        "target.com/5",
        "target.com/6",
    ]);
    assert_eq!(calculate_aiv_score(&list, "target.com"), 100.0);
}

#[test]
fn test_aiv_score_prominence_goes_negative_past_window() {
    // N = 10, K = 5, first mention at 7: prominence = 1 - 6/5 = -0.2
    let mut urls = vec!["other.com"; 10];
    urls[6] = "target.com";
    assert_eq!(calculate_aiv_score(&sources(&urls), "target.com"), 36.0);

    // N = 12, first mention at 12: prominence = -1.2, score drops below zero
    let mut urls = vec!["other.com"; 12];
    urls[11] = "target.com";
    let score = calculate_aiv_score(&sources(&urls), "target.com");
    assert_eq!(score, -4.0);
    assert_eq!(aiv_level(score), AivLevel::Low);
}

#[test]
fn test_aiv_score_is_bounded_within_prominence_window() {
    for total in 1..=5 {
        for rank in 1..=total {
            let mut urls = vec!["other.com"; total];
            urls[rank - 1] = "target.com";
            let score = calculate_aiv_score(&sources(&urls), "target.com");
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }
}

#[test]
fn test_aiv_score_lowercases_target() {
    let list = sources(&["target.com"]);
    assert_eq!(calculate_aiv_score(&list, "TARGET.com"), 84.0);
}

#[test]
fn test_aiv_level_boundaries() {
    assert_eq!(aiv_level(0.0), AivLevel::Low);
    assert_eq!(aiv_level(30.0), AivLevel::Low);
    assert_eq!(aiv_level(30.1), AivLevel::Medium);
    assert_eq!(aiv_level(60.0), AivLevel::Medium);
    assert_eq!(aiv_level(60.1), AivLevel::High);
    assert_eq!(aiv_level(80.0), AivLevel::High);
    assert_eq!(aiv_level(80.1), AivLevel::Dominant);
    assert_eq!(aiv_level(100.0), AivLevel::Dominant);
}

#[test]
fn test_recommendation_label() {
    assert_eq!(recommendation_label(0), "Не рекомендується");
    assert_eq!(recommendation_label(1), "Рекомендується (1)");
    assert_eq!(recommendation_label(7), "Рекомендується (7)");
}

#[test]
fn test_empty_target_never_matches_unparsable_sources() {
    let list = sources(&["", "not a url at all!!!"]);
    let record = calculate_query_metrics(&list, "", "UK");
    assert_eq!(record.mentions_count, 0);
    assert_eq!(record.best_rank, None);
    assert_eq!(record.aiv_score, 40.0);
}

#[test]
fn test_empty_target_treats_every_domain_as_competitor() {
    let list = sources(&["a.com", "b.com"]);
    let record = calculate_query_metrics(&list, "", "UK");
    assert_eq!(record.competitors, vec!["a.com".to_string(), "b.com".to_string()]);
    assert_eq!(record.competitor_strength_index, Some(1.5));
}

#[test]
fn test_target_is_lowercased_not_parsed() {
    // A URL-shaped or www-prefixed target is never stripped, so it cannot match
    let list = sources(&["https://www.amazon.com/item"]);
    let record = calculate_query_metrics(&list, "WWW.Amazon.com", "UK");
    assert_eq!(record.target_domain, "www.amazon.com");
    assert_eq!(record.mentions_count, 0);

    let record = calculate_query_metrics(&list, "Amazon.com", "UK");
    assert_eq!(record.target_domain, "amazon.com");
    assert_eq!(record.mentions_count, 1);
}

#[test]
fn test_source_on_other_port_is_not_a_mention() {
    let record = calculate_query_metrics(&sources(&["https://amazon.com:8443/p"]), "amazon.com", "UK");
    assert_eq!(record.mentions_count, 0);
    assert_eq!(record.competitors, vec!["amazon.com:8443".to_string()]);

    let list = sources(&["https://amazon.com:8443/p", "https://www.amazon.com:443/x"]);
    let record = calculate_query_metrics(&list, "amazon.com", "UK");
    assert_eq!(record.mentions_count, 1);
    assert_eq!(record.best_rank, Some(2));
}

#[test]
fn test_source_with_userinfo_is_not_a_mention() {
    let list = sources(&["https://user@www.evil.com/"]);
    let record = calculate_query_metrics(&list, "evil.com", "UK");
    assert_eq!(record.mentions_count, 0);
    assert_eq!(record.competitors, vec!["user@www.evil.com".to_string()]);
}

#[test]
fn test_malformed_source_url_degrades_to_no_domain() {
    let list = sources(&["", "amazon.com"]);
    let record = calculate_query_metrics(&list, "amazon.com", "UK");
    assert_eq!(record.best_rank, Some(2));
    assert_eq!(record.aiv_score, 64.0);
    assert!(record.competitors.is_empty());
    assert_eq!(record.competitor_strength_label, StrengthLabel::NoCompetitors);
    assert_eq!(record.coverage_type, "Other (100%)");
}

#[test]
fn test_competitor_strength_labels() {
    // Competitors at ranks 3, 4, 5
    let weak = sources(&["t.com", "t.com", "a.com", "b.com", "c.com"]);
    assert_eq!(
        calculate_competitor_strength(&weak, "t.com", 3),
        (Some(4.0), StrengthLabel::Weak)
    );

    // Competitors at ranks 2, 3, 4
    let moderate = sources(&["t.com", "a.com", "b.com", "c.com"]);
    assert_eq!(
        calculate_competitor_strength(&moderate, "t.com", 3),
        (Some(3.0), StrengthLabel::Moderate)
    );

    // Competitors at ranks 1, 2, 3
    let strong = sources(&["a.com", "b.com", "c.com", "t.com"]);
    assert_eq!(
        calculate_competitor_strength(&strong, "t.com", 3),
        (Some(2.0), StrengthLabel::Strong)
    );
}

#[test]
fn test_competitor_strength_rounds_to_two_decimals() {
    // Competitors at ranks 1, 2, 4
    let list = sources(&["a.com", "b.com", "t.com", "c.com", "d.com"]);
    assert_eq!(
        calculate_competitor_strength(&list, "t.com", 3),
        (Some(2.33), StrengthLabel::Moderate)
    );
}

#[test]
fn test_competitor_strength_respects_k() {
    let list = sources(&["a.com", "b.com", "c.com", "d.com", "e.com"]);
    assert_eq!(
        calculate_competitor_strength(&list, "t.com", 5),
        (Some(3.0), StrengthLabel::Moderate)
    );
    assert_eq!(
        calculate_competitor_strength(&list, "t.com", 1),
        (Some(1.0), StrengthLabel::Strong)
    );
}

#[test]
fn test_competitor_strength_no_competitors() {
    let list = sources(&["t.com", "", "https://www.t.com/x"]);
    assert_eq!(
        calculate_competitor_strength(&list, "t.com", 3),
        (None, StrengthLabel::NoCompetitors)
    );
}

#[test]
fn test_top_competitors_distinct_first_five_capped_at_three() {
    let list = sources(&["a.com/1", "a.com/2", "b.com", "t.com", "c.com", "d.com"]);
    assert_eq!(
        top_competitors(&list, "t.com"),
        vec!["a.com".to_string(), "b.com".to_string(), "c.com".to_string()]
    );

    // d.com sits at rank 6, outside the window
    let list = sources(&["t.com", "a.com", "a.com", "t.com", "b.com", "d.com"]);
    assert_eq!(
        top_competitors(&list, "t.com"),
        vec!["a.com".to_string(), "b.com".to_string()]
    );
}

#[test]
fn test_classify_source_url_priority() {
    assert_eq!(classify_source_url("https://www.reddit.com/r/x"), CoverageBucket::Forum);
    assert_eq!(classify_source_url("https://quora.com/q"), CoverageBucket::Forum);
    // Forum wins over Docs
    assert_eq!(classify_source_url("https://forum.example.com/docs/x"), CoverageBucket::Forum);
    assert_eq!(classify_source_url("https://example.com/help/center"), CoverageBucket::Docs);
    // Docs wins over Product
    assert_eq!(classify_source_url("https://example.com/docs/product"), CoverageBucket::Docs);
    assert_eq!(classify_source_url("https://shop.com/buy/now"), CoverageBucket::Product);
    assert_eq!(classify_source_url("https://Example.com/BLOG/post"), CoverageBucket::Blog);
    assert_eq!(classify_source_url("https://example.com/reviews"), CoverageBucket::Blog);
    assert_eq!(classify_source_url("https://example.com/"), CoverageBucket::Other);
    assert_eq!(classify_source_url(""), CoverageBucket::Other);
}

#[test]
fn test_coverage_type_top_two_with_first_seen_ties() {
    let list = sources(&[
        "https://reddit.com/r/x",
        "https://example.com/docs/a",
        "https://shop.com/product/1",
        "https://x.com/blog/y",
    ]);
    assert_eq!(analyze_coverage_type(&list), "Forum (25%), Docs (25%)");
}

#[test]
fn test_coverage_type_orders_by_count() {
    let list = sources(&[
        "https://x.com/blog/a",
        "https://shop.com/product/1",
        "https://shop.com/product/2",
    ]);
    assert_eq!(analyze_coverage_type(&list), "Product (67%), Blog (33%)");
}

#[test]
fn test_coverage_type_rounds_half_to_even() {
    let mut urls = vec!["https://example.com/"; 7];
    urls.push("https://reddit.com/r/x");
    assert_eq!(analyze_coverage_type(&sources(&urls)), "Other (88%), Forum (12%)");
}

#[test]
fn test_coverage_type_single_bucket() {
    let list = sources(&["https://reddit.com/a", "https://quora.com/b"]);
    assert_eq!(analyze_coverage_type(&list), "Forum (100%)");
}

#[test]
fn test_query_metrics_is_deterministic() {
    let list = sources(&[
        "https://www.reddit.com/r/vacuums",
        "https://dyson.co.uk/product/v15",
        "https://amazon.co.uk/dp/123",
        "https://which.co.uk/reviews/vacuums",
        "",
        "https://amazon.co.uk/dp/456",
    ]);

    let first = calculate_query_metrics(&list, "amazon.co.uk", "UK");
    let second = calculate_query_metrics(&list, "amazon.co.uk", "UK");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_query_result_metrics_matches_free_function() {
    let list = sources(&["amazon.com/x", "ebay.com/y"]);
    let query = crate::models::QueryResult::new("DE", "amazon.com", list.clone());
    assert_eq!(query.metrics(), calculate_query_metrics(&list, "amazon.com", "DE"));
}
