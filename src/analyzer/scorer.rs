//! Per-item heuristic scorer

use std::collections::BTreeSet;

use super::category::round_to;
use super::error::{ScoreError, ScoreResult};
use super::keywords::{
    matching_keywords, negative_patterns, HIGH_STRESS_KEYWORDS, MODERATE_STRESS_KEYWORDS,
    NEGATIVE_PATTERN_MARKER, POSITIVE_KEYWORDS,
};
use super::types::{excerpt, ItemScore, Sentiment};

const HIGH_STRESS_WEIGHT: f64 = 0.4;
const HIGH_STRESS_CAP: usize = 3;
const MODERATE_STRESS_WEIGHT: f64 = 0.2;
const MODERATE_STRESS_CAP: usize = 2;
const NEGATIVE_PATTERN_WEIGHT: f64 = 0.1;
const POSITIVE_WEIGHT: f64 = 0.15;
const POSITIVE_CAP: usize = 2;

/// Score above which an item counts as carrying stress indicators
pub const INDICATOR_SCORE_THRESHOLD: f64 = 0.3;

/// Scores a single text. The batch aggregator is generic over this seam.
pub trait TextScorer {
    fn try_score(&self, text: &str) -> ScoreResult<ItemScore>;
}

impl<T: TextScorer + ?Sized> TextScorer for &T {
    fn try_score(&self, text: &str) -> ScoreResult<ItemScore> {
        (**self).try_score(text)
    }
}

/// Keyword and pattern scorer. Holds no state; tables are process-wide constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `text`, applying the steps in a fixed order
    pub fn score(&self, text: &str) -> ItemScore {
        if text.is_empty() {
            return ItemScore::empty();
        }

        let text_lower = text.to_lowercase();
        let mut stress_score = 0.0_f64;
        let mut indicators: Vec<String> = Vec::new();
        let mut sentiment = Sentiment::Neutral;

        let high = matching_keywords(HIGH_STRESS_KEYWORDS, &text_lower);
        if !high.is_empty() {
            stress_score += HIGH_STRESS_WEIGHT * high.len().min(HIGH_STRESS_CAP) as f64;
            indicators.extend(high.iter().map(|kw| kw.to_string()));
            sentiment = Sentiment::Negative;
        }

        let moderate = matching_keywords(MODERATE_STRESS_KEYWORDS, &text_lower);
        if !moderate.is_empty() {
            stress_score += MODERATE_STRESS_WEIGHT * moderate.len().min(MODERATE_STRESS_CAP) as f64;
            indicators.extend(moderate.iter().map(|kw| kw.to_string()));
            if sentiment == Sentiment::Neutral {
                sentiment = Sentiment::SlightlyNegative;
            }
        }

        for pattern in negative_patterns() {
            if pattern.is_match(&text_lower) {
                stress_score += NEGATIVE_PATTERN_WEIGHT;
                indicators.push(NEGATIVE_PATTERN_MARKER.to_string());
                if sentiment == Sentiment::Neutral {
                    sentiment = Sentiment::SlightlyNegative;
                }
            }
        }

        // Positive terms lower the score but never override a negative label
        let positive = matching_keywords(POSITIVE_KEYWORDS, &text_lower);
        if !positive.is_empty() {
            stress_score -= POSITIVE_WEIGHT * positive.len().min(POSITIVE_CAP) as f64;
            if matches!(sentiment, Sentiment::Neutral | Sentiment::SlightlyNegative) {
                sentiment = Sentiment::Positive;
            }
        }

        let stress_score = stress_score.clamp(0.0, 1.0);
        let has_stress_indicators = stress_score > INDICATOR_SCORE_THRESHOLD || !indicators.is_empty();

        ItemScore {
            stress_score: round_to(stress_score, 3),
            has_stress_indicators,
            indicators_found: indicators.into_iter().collect::<BTreeSet<_>>(),
            sentiment,
            text_excerpt: excerpt(text),
            error: None,
        }
    }
}

impl TextScorer for KeywordScorer {
    fn try_score(&self, text: &str) -> ScoreResult<ItemScore> {
        Ok(self.score(text))
    }
}

/// Run `scorer`, converting failures and non-finite scores into a zero-filled result
pub fn score_or_zero<S: TextScorer + ?Sized>(scorer: &S, text: &str) -> (ItemScore, Option<ScoreError>) {
    let outcome = scorer.try_score(text).and_then(|score| {
        if score.stress_score.is_finite() {
            Ok(score)
        } else {
            Err(ScoreError::NonFiniteScore { value: score.stress_score })
        }
    });

    match outcome {
        Ok(score) => (score, None),
        Err(e) => {
            log::warn!("Error scoring item: {}", e);
            (ItemScore::failed(e.to_string()), Some(e))
        }
    }
}
