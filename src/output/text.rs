//! Human-readable report tables

use prettytable::{format, Cell, Row, Table};

use crate::display::{single_line, ColourManager};
use crate::record::AnalysisRecord;

/// Excerpt width in the samples table
const SAMPLE_EXCERPT_CHARS: usize = 60;

pub fn render_records(records: &[AnalysisRecord], colours: &ColourManager) -> String {
    records
        .iter()
        .map(|record| render_record(record, colours))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_record(record: &AnalysisRecord, colours: &ColourManager) -> String {
    let report = &record.report;
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} ({}, {})\n",
        colours.heading("Stress analysis for"),
        colours.heading(&record.platform.display_handle(&record.username_analyzed)),
        record.platform,
        record.analysis_type
    ));
    output.push_str(&format!(
        "Stress level: {} {}\n\n",
        colours.category(report.stress_category, &format!("{:.3}", report.stress_level)),
        colours.category(report.stress_category, &format!("({})", report.stress_category)),
    ));

    let distribution = &report.sentiment_distribution;
    let metrics = [
        ("Confidence", format!("{:.3}", report.confidence_score)),
        ("Items analysed", report.total_analyzed.to_string()),
        ("Items with indicators", report.items_with_indicators.to_string()),
        ("Stress percentage", format!("{:.2}%", report.stress_percentage)),
        ("Average sentiment", format!("{:.3}", report.average_sentiment)),
        (
            "Sentiment (pos/neu/neg)",
            format!("{}/{}/{}", distribution.positive, distribution.neutral, distribution.negative),
        ),
        ("Total stress score", format!("{:.3}", report.detailed_metrics.total_stress_score)),
        ("Failed items", report.detailed_metrics.failed_items.to_string()),
        ("Processing time", format!("{:.3}s", record.processing_time_seconds)),
        ("Analysed at", record.analysis_date.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ("Record", record.id.to_string()),
    ];

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    for (label, value) in metrics {
        table.add_row(Row::new(vec![Cell::new(label), Cell::new(&value)]));
    }
    output.push_str(&indent(&table.to_string()));

    if report.top_samples.is_empty() {
        return output;
    }

    output.push('\n');
    output.push_str(&format!("{}\n", colours.heading("Top samples")));

    let mut samples = Table::new();
    samples.set_format(*format::consts::FORMAT_CLEAN);
    samples.set_titles(Row::new(
        ["#", "Score", "Indicators", "Created", "Excerpt"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));
    for (index, sample) in report.top_samples.iter().enumerate() {
        let indicators = if sample.indicators.is_empty() {
            "-".to_string()
        } else {
            sample.indicators.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        };
        let created = sample
            .created_at
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        samples.add_row(Row::new(vec![
            Cell::new(&(index + 1).to_string()),
            Cell::new(&format!("{:.3}", sample.score)),
            Cell::new(&indicators),
            Cell::new(&created),
            Cell::new(&truncate(&single_line(&sample.excerpt), SAMPLE_EXCERPT_CHARS)),
        ]));
    }
    output.push_str(&indent(&samples.to_string()));

    output
}

fn indent(table: &str) -> String {
    table.lines().map(|line| format!("  {}\n", line.trim_end())).collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
