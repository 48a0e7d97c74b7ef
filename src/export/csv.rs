//! CSV report export.
//!
//! One row per prompt, in input-row order, under a fixed header that the
//! downstream report consumer reads by name.

use anyhow::Result;
use csv::Writer;
use std::io::Write;

use crate::models::MetricsRecord;

/// Report header, in column order.
pub const REPORT_COLUMNS: [&str; 13] = [
    "Страна",
    "Целевой домен",
    "Рекомендація АІ",
    "Позиція",
    "Best Rank Explanation",
    "AIV-Score",
    "AIV-Score Level",
    "Mentions Count",
    "Конкуренти",
    "Competitor Strength Index",
    "Competitor Strength Label",
    "Coverage Type",
    "Total Sources",
];

/// Writes the report header followed by one row per record.
///
/// Missing `Позиція` and `Competitor Strength Index` values are written as empty
/// cells. `AIV-Score` always carries one decimal.
///
/// # Returns
///
/// Returns the number of records written.
pub fn write_report_csv<W: Write>(records: &[MetricsRecord], output: W) -> Result<usize> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(REPORT_COLUMNS)?;

    for record in records {
        writer.write_record(report_row(record))?;
    }

    writer.flush()?;
    Ok(records.len())
}

fn report_row(record: &MetricsRecord) -> [String; 13] {
    [
        record.country.clone(),
        record.target_domain.clone(),
        record.recommendation.clone(),
        record.best_rank.map(|rank| rank.to_string()).unwrap_or_default(),
        record.best_rank_explanation.clone(),
        format!("{:.1}", record.aiv_score),
        record.aiv_level.to_string(),
        record.mentions_count.to_string(),
        record.competitors_display(),
        record
            .competitor_strength_index
            .map(format_index)
            .unwrap_or_default(),
        record.competitor_strength_label.to_string(),
        record.coverage_type.clone(),
        record.total_sources.to_string(),
    ]
}

/// Shortest form, but always with a decimal point (`2.0`, `2.33`).
fn format_index(index: f64) -> String {
    if index.fract() == 0.0 {
        format!("{index:.1}")
    } else {
        index.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use crate::scoring::calculate_query_metrics;

    fn render(records: &[MetricsRecord]) -> String {
        let mut buffer = Vec::new();
        write_report_csv(records, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_report_csv_header_only() {
        let csv = render(&[]);
        assert_eq!(
            csv,
            "Страна,Целевой домен,Рекомендація АІ,Позиція,Best Rank Explanation,AIV-Score,\
             AIV-Score Level,Mentions Count,Конкуренти,Competitor Strength Index,\
             Competitor Strength Label,Coverage Type,Total Sources\n"
        );
    }

    #[test]
    fn test_write_report_csv_visible_row() {
        let sources = vec![
            Source::new("amazon.com/x"),
            Source::new("ebay.com/y"),
            Source::new("walmart.com/z"),
            Source::new("amazon.com/w"),
        ];
        let record = calculate_query_metrics(&sources, "amazon.com", "UK");
        let csv = render(&[record]);
        let row = csv.lines().nth(1).unwrap();

        // Competitors at ranks 2 and 3: index 2.5; comma-joined cells are quoted
        assert_eq!(
            row,
            "UK,amazon.com,Рекомендується (2),1,Target domain appears at #1,88.0,Dominant,2,\
             \"ebay.com, walmart.com\",2.5,Moderate,Other (100%),4"
        );
    }

    #[test]
    fn test_write_report_csv_not_visible_row() {
        let record = calculate_query_metrics(&[], "amazon.com", "USA");
        let csv = render(&[record]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "USA,amazon.com,Не рекомендується,,Not visible,0.0,Low,0,,,No competitors,N/A,0"
        );
    }

    #[test]
    fn test_format_index() {
        assert_eq!(format_index(2.0), "2.0");
        assert_eq!(format_index(2.33), "2.33");
        assert_eq!(format_index(1.5), "1.5");
    }
}
