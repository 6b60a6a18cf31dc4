//! Stress category ladder and confidence estimate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse bucket for a batch's mean stress level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressCategory {
    #[default]
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl StressCategory {
    pub const VERY_HIGH_THRESHOLD: f64 = 0.7;
    pub const HIGH_THRESHOLD: f64 = 0.5;
    pub const MODERATE_THRESHOLD: f64 = 0.3;

    /// Map a stress level onto the ladder, highest bucket first; ties go up
    pub fn from_level(level: f64) -> Self {
        if level >= Self::VERY_HIGH_THRESHOLD {
            StressCategory::VeryHigh
        } else if level >= Self::HIGH_THRESHOLD {
            StressCategory::High
        } else if level >= Self::MODERATE_THRESHOLD {
            StressCategory::Moderate
        } else {
            StressCategory::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StressCategory::Low => "low",
            StressCategory::Moderate => "moderate",
            StressCategory::High => "high",
            StressCategory::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ceiling applied to the sample-size part of the confidence estimate
pub const CONFIDENCE_SAMPLE_CAP: f64 = 0.95;

/// Heuristic reliability of a batch report.
///
/// The sample-size term is capped at 0.95 before the consistency bonus is
/// added, so the result can exceed 0.95 (up to 1.1) for large batches where
/// at least half the items carry indicators.
pub fn confidence_score(total_analyzed: usize, items_with_indicators: usize, stress_percentage: f64) -> f64 {
    let mut confidence = CONFIDENCE_SAMPLE_CAP.min(0.5 + (total_analyzed as f64 / 200.0) * 0.3);
    if items_with_indicators > 0 {
        let consistency = 1.0_f64.min(stress_percentage / 50.0);
        confidence += consistency * 0.15;
    }
    round_to(confidence, 3)
}

/// Round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
