//! Engine data model
//!
//! Input items, per-item scores and the aggregate batch report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Number of characters of the original text kept in an excerpt
pub const EXCERPT_CHARS: usize = 200;

/// A single post or comment supplied for scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl TextItem {
    pub fn new(id: Option<String>, text: impl Into<String>, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            text: text.into(),
            created_at,
        }
    }

    /// Convenience constructor for items without identity or timestamp
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(None, text, None)
    }
}

/// Coarse sentiment label assigned while scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    SlightlyNegative,
    Negative,
}

impl Sentiment {
    /// Numeric value used when averaging sentiment across a batch
    pub fn numeric_value(self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Neutral => 0.5,
            Sentiment::SlightlyNegative => 0.3,
            Sentiment::Negative => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::SlightlyNegative => "slightly_negative",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for one text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    /// Heuristic intensity, always within [0.0, 1.0] and rounded to 3 places
    pub stress_score: f64,
    pub has_stress_indicators: bool,
    pub indicators_found: BTreeSet<String>,
    pub sentiment: Sentiment,
    pub text_excerpt: String,
    /// Set when scoring failed and the item was zero-filled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemScore {
    /// Zero-score neutral result for empty or absent text
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zero-score neutral result carrying the failure message
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Counts of items per sentiment bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    /// Both `slightly_negative` and `negative` items
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::SlightlyNegative | Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// One of the highest-scoring items in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSample {
    pub id: Option<String>,
    pub excerpt: String,
    pub score: f64,
    pub indicators: BTreeSet<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Supplementary batch totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub total_stress_score: f64,
    pub average_stress_per_item: f64,
    /// Items whose scoring failed and were zero-filled
    pub failed_items: usize,
}

/// Aggregate report over a batch of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub stress_level: f64,
    pub stress_category: super::StressCategory,
    pub confidence_score: f64,
    pub total_analyzed: usize,
    pub items_with_indicators: usize,
    pub stress_percentage: f64,
    pub average_sentiment: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub detailed_metrics: DetailedMetrics,
    pub top_samples: Vec<TopSample>,
}

impl BatchReport {
    /// Zero-valued report for batches with nothing to score
    pub fn empty() -> Self {
        Self {
            stress_level: 0.0,
            stress_category: super::StressCategory::Low,
            confidence_score: 0.0,
            total_analyzed: 0,
            items_with_indicators: 0,
            stress_percentage: 0.0,
            average_sentiment: 0.0,
            sentiment_distribution: SentimentDistribution::default(),
            detailed_metrics: DetailedMetrics::default(),
            top_samples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_analyzed == 0
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::empty()
    }
}

/// First `EXCERPT_CHARS` characters of `text`
pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
