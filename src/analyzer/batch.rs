//! Batch aggregation
//!
//! Scores every item with non-empty text and folds the results into a
//! `BatchReport`. Item failures are zero-filled and never abort the batch.

use log::debug;

use super::category::{confidence_score, round_to, StressCategory};
use super::error::ScoreError;
use super::scorer::{score_or_zero, TextScorer};
use super::types::{BatchReport, DetailedMetrics, ItemScore, SentimentDistribution, TextItem, TopSample};

/// Maximum number of samples kept in a report
pub const TOP_SAMPLE_LIMIT: usize = 5;

/// A report together with the item failures encountered while building it
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub report: BatchReport,
    pub failures: Vec<ScoreError>,
}

impl BatchOutcome {
    /// True when items were scored but every one of them failed
    pub fn all_failed(&self) -> bool {
        self.report.total_analyzed > 0 && self.failures.len() == self.report.total_analyzed
    }
}

struct ScoredItem<'a> {
    item: &'a TextItem,
    score: ItemScore,
}

/// Score `items` with `scorer` and build the aggregate report
pub fn aggregate<S: TextScorer + ?Sized>(scorer: &S, items: &[TextItem]) -> BatchReport {
    aggregate_with_failures(scorer, items).report
}

/// As `aggregate`, also returning the per-item failures
pub fn aggregate_with_failures<S: TextScorer + ?Sized>(scorer: &S, items: &[TextItem]) -> BatchOutcome {
    let mut failures = Vec::new();
    let scored: Vec<ScoredItem<'_>> = items
        .iter()
        .filter(|item| !item.text.is_empty())
        .map(|item| {
            let (score, failure) = score_or_zero(scorer, &item.text);
            failures.extend(failure);
            ScoredItem { item, score }
        })
        .collect();

    if scored.is_empty() {
        debug!("No scorable items in batch of {}", items.len());
        return BatchOutcome {
            report: BatchReport::empty(),
            failures,
        };
    }

    let total_analyzed = scored.len();
    let total = total_analyzed as f64;

    let total_stress_score: f64 = scored.iter().map(|s| s.score.stress_score).sum();
    let items_with_indicators = scored.iter().filter(|s| s.score.has_stress_indicators).count();
    let sentiment_total: f64 = scored.iter().map(|s| s.score.sentiment.numeric_value()).sum();

    let mut sentiment_distribution = SentimentDistribution::default();
    for s in &scored {
        sentiment_distribution.record(s.score.sentiment);
    }

    let average_stress = total_stress_score / total;
    let stress_level = round_to(average_stress, 3);
    let indicator_percentage = items_with_indicators as f64 / total * 100.0;
    let stress_percentage = round_to(indicator_percentage, 2);
    let average_sentiment = round_to(sentiment_total / total, 3);
    let stress_category = StressCategory::from_level(stress_level);
    let confidence = confidence_score(total_analyzed, items_with_indicators, indicator_percentage);

    let report = BatchReport {
        stress_level,
        stress_category,
        confidence_score: confidence,
        total_analyzed,
        items_with_indicators,
        stress_percentage,
        average_sentiment,
        sentiment_distribution,
        detailed_metrics: DetailedMetrics {
            total_stress_score: round_to(total_stress_score, 3),
            average_stress_per_item: stress_level,
            failed_items: failures.len(),
        },
        top_samples: top_samples(scored),
    };

    debug!(
        "Scored {} items: level {:.3} ({}), {} with indicators, {} failed",
        total_analyzed,
        report.stress_level,
        report.stress_category,
        items_with_indicators,
        failures.len()
    );

    BatchOutcome { report, failures }
}

/// Highest-scoring items first; equal scores keep input order
fn top_samples(mut scored: Vec<ScoredItem<'_>>) -> Vec<TopSample> {
    // sort_by is stable
    scored.sort_by(|a, b| b.score.stress_score.total_cmp(&a.score.stress_score));
    scored
        .into_iter()
        .take(TOP_SAMPLE_LIMIT)
        .map(|s| TopSample {
            id: s.item.id.clone(),
            excerpt: s.score.text_excerpt,
            score: s.score.stress_score,
            indicators: s.score.indicators_found,
            created_at: s.item.created_at,
        })
        .collect()
}
