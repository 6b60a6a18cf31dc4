use crate::display::{single_line, CompactFormat};
use crate::record::AnalysisRecord;

impl CompactFormat for AnalysisRecord {
    fn to_compact_format(&self) -> String {
        let report = &self.report;
        format!(
            "{} {}: {} level={:.3} confidence={:.3} items={} indicators={} ({:.2}%) sentiment={:.3}",
            self.platform,
            single_line(&self.platform.display_handle(&self.username_analyzed)),
            report.stress_category,
            report.stress_level,
            report.confidence_score,
            report.total_analyzed,
            report.items_with_indicators,
            report.stress_percentage,
            report.average_sentiment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_record;

    #[test]
    fn test_compact_record() {
        let record = sample_record("alice", &["I am so overwhelmed and exhausted", "I feel relaxed and grateful"]);
        assert_eq!(
            record.to_compact_format(),
            "twitter @alice: moderate level=0.400 confidence=0.653 items=2 indicators=1 (50.00%) sentiment=0.500"
        );
    }
}
