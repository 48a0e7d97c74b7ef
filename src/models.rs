//! Data model shared by ingestion, retrieval, scoring and export.

use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// One citation returned by the answer engine for a prompt.
///
/// Position in the source list is the provider's ranking (rank = 1-based index).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Cited URL as returned by the provider; may be empty or malformed.
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Source {
    /// Creates a source with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Scoring input for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub country: String,
    pub target_domain: String,
    pub sources: Vec<Source>,
}

impl QueryResult {
    pub fn new(
        country: impl Into<String>,
        target_domain: impl Into<String>,
        sources: Vec<Source>,
    ) -> Self {
        Self {
            country: country.into(),
            target_domain: target_domain.into(),
            sources,
        }
    }

    /// Scores this query. See [`crate::scoring::calculate_query_metrics`].
    pub fn metrics(&self) -> MetricsRecord {
        crate::scoring::calculate_query_metrics(&self.sources, &self.target_domain, &self.country)
    }
}

/// Qualitative band for an AIV score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr,
)]
pub enum AivLevel {
    Low,
    Medium,
    High,
    Dominant,
}

/// Competitive pressure from the top-ranked non-target sources.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr,
)]
pub enum StrengthLabel {
    Strong,
    Moderate,
    Weak,
    #[strum(serialize = "No competitors")]
    #[serde(rename = "No competitors")]
    NoCompetitors,
}

/// Content category of a cited source, derived from its URL.
///
/// Variant order is the classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum CoverageBucket {
    Forum,
    Docs,
    Product,
    Blog,
    Other,
}

/// Per-prompt report row.
///
/// Serialized field names are the downstream report contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    #[serde(rename = "Страна")]
    pub country: String,
    #[serde(rename = "Целевой домен")]
    pub target_domain: String,
    #[serde(rename = "Рекомендація АІ")]
    pub recommendation: String,
    #[serde(rename = "Позиція")]
    pub best_rank: Option<usize>,
    #[serde(rename = "Best Rank Explanation")]
    pub best_rank_explanation: String,
    #[serde(rename = "AIV-Score")]
    pub aiv_score: f64,
    #[serde(rename = "AIV-Score Level")]
    pub aiv_level: AivLevel,
    #[serde(rename = "Mentions Count")]
    pub mentions_count: usize,
    /// At most three distinct competitor domains, in rank order.
    #[serde(rename = "Конкуренти", serialize_with = "serialize_joined")]
    pub competitors: Vec<String>,
    #[serde(rename = "Competitor Strength Index")]
    pub competitor_strength_index: Option<f64>,
    #[serde(rename = "Competitor Strength Label")]
    pub competitor_strength_label: StrengthLabel,
    #[serde(rename = "Coverage Type")]
    pub coverage_type: String,
    #[serde(rename = "Total Sources")]
    pub total_sources: usize,
}

impl MetricsRecord {
    /// Competitor domains as shown in the report cell.
    pub fn competitors_display(&self) -> String {
        self.competitors.join(", ")
    }
}

fn serialize_joined<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&values.join(", "))
}
