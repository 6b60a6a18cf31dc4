//! Stress Scoring Engine
//!
//! Heuristic keyword/pattern scoring of individual texts and aggregation of
//! a batch of texts into a `BatchReport`. The engine is a pure function over
//! in-memory data: no I/O and no state between calls, so a single
//! `StressAnalyzer` can be shared freely across threads.

pub mod batch;
pub mod category;
pub mod error;
pub mod keywords;
pub mod scorer;
pub mod types;

pub use batch::{aggregate, aggregate_with_failures, BatchOutcome, TOP_SAMPLE_LIMIT};
pub use category::{confidence_score, round_to, StressCategory};
pub use error::{AnalysisError, ScoreError, ScoreResult};
pub use scorer::{KeywordScorer, TextScorer};
pub use types::{
    BatchReport, DetailedMetrics, ItemScore, Sentiment, SentimentDistribution, TextItem, TopSample,
};

/// Entry point for scoring single texts and batches
#[derive(Debug, Clone, Copy, Default)]
pub struct StressAnalyzer {
    scorer: KeywordScorer,
}

impl StressAnalyzer {
    pub fn new() -> Self {
        Self {
            scorer: KeywordScorer::new(),
        }
    }

    /// Score one text. Empty or absent text yields a zero-score neutral result.
    pub fn score_item<'a>(&self, text: impl Into<Option<&'a str>>) -> ItemScore {
        match text.into() {
            Some(text) if !text.is_empty() => scorer::score_or_zero(&self.scorer, text).0,
            _ => ItemScore::empty(),
        }
    }

    /// Score a batch and aggregate it into a report
    pub fn score_batch(&self, items: &[TextItem]) -> BatchReport {
        aggregate(&self.scorer, items)
    }

    /// As `score_batch`, also returning item failures
    pub fn score_batch_with_failures(&self, items: &[TextItem]) -> BatchOutcome {
        aggregate_with_failures(&self.scorer, items)
    }
}

impl TextScorer for StressAnalyzer {
    fn try_score(&self, text: &str) -> ScoreResult<ItemScore> {
        self.scorer.try_score(text)
    }
}
