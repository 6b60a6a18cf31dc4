//! CSV export: one row per top sample
//!
//! Record-level fields repeat on every row. A record without samples still
//! gets one row with the sample columns left empty.

use serde::Serialize;

use crate::analyzer::TopSample;
use crate::record::AnalysisRecord;

#[derive(Debug, Serialize)]
struct SampleRow<'a> {
    record_id: String,
    username: &'a str,
    platform: &'a str,
    stress_category: &'a str,
    stress_level: f64,
    confidence_score: f64,
    total_analyzed: usize,
    rank: Option<usize>,
    item_id: Option<&'a str>,
    score: Option<f64>,
    indicators: String,
    created_at: Option<String>,
    excerpt: Option<&'a str>,
}

impl<'a> SampleRow<'a> {
    fn new(record: &'a AnalysisRecord, sample: Option<(usize, &'a TopSample)>) -> Self {
        let report = &record.report;
        Self {
            record_id: record.id.to_string(),
            username: &record.username_analyzed,
            platform: record.platform.as_str(),
            stress_category: report.stress_category.as_str(),
            stress_level: report.stress_level,
            confidence_score: report.confidence_score,
            total_analyzed: report.total_analyzed,
            rank: sample.map(|(rank, _)| rank),
            item_id: sample.and_then(|(_, s)| s.id.as_deref()),
            score: sample.map(|(_, s)| s.score),
            indicators: sample
                .map(|(_, s)| s.indicators.iter().map(String::as_str).collect::<Vec<_>>().join(";"))
                .unwrap_or_default(),
            created_at: sample.and_then(|(_, s)| s.created_at).map(|ts| ts.to_rfc3339()),
            excerpt: sample.map(|(_, s)| s.excerpt.as_str()),
        }
    }
}

pub fn render_records(records: &[AnalysisRecord]) -> Result<String, ::csv::Error> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    for record in records {
        if record.report.top_samples.is_empty() {
            writer.serialize(SampleRow::new(record, None))?;
            continue;
        }
        for (index, sample) in record.report.top_samples.iter().enumerate() {
            writer.serialize(SampleRow::new(record, Some((index + 1, sample))))?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| ::csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::BatchReport;
    use crate::output::test_support::sample_record;
    use crate::record::{AnalysisType, Platform};

    #[test]
    fn test_rows_per_sample_with_header() {
        let record = sample_record("alice", &["panic and burnout", "busy", "calm"]);
        let output = render_records(std::slice::from_ref(&record)).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("record_id,username,platform,stress_category"));
        assert!(lines[1].contains(",alice,twitter,"));
        assert!(lines[1].contains(",1,t1,0.8,burnout;panic,"));
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let record = sample_record("bob", &["deadline, again \"seriously\""]);
        let output = render_records(std::slice::from_ref(&record)).unwrap();

        let mut reader = ::csv::Reader::from_reader(output.as_bytes());
        let rows: Vec<::csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][12], "deadline, again \"seriously\"");
        assert!(output.contains("\"deadline, again \"\"seriously\"\"\""));
    }

    #[test]
    fn test_record_without_samples_gets_one_row() {
        let record = AnalysisRecord::new("carol", Platform::Reddit, AnalysisType::OAuth, BatchReport::empty(), 0.0);
        let output = render_records(&[record]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(",carol,reddit,low,0.0,0.0,0,,,,,,"));
    }
}
