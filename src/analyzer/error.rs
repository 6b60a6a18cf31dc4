//! Analyzer Error Types
//!
//! Item-level failures are recovered by zero-filling the item. Record-level
//! failures surface to the caller as `AnalysisError`.

use thiserror::Error;

/// Result type for scoring a single item
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Failure while scoring one item
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    /// The scorer produced a NaN or infinite score
    #[error("Scorer produced a non-finite score: {value}")]
    NonFiniteScore { value: f64 },

    /// Generic scoring failure
    #[error("Item scoring failed: {message}")]
    Failed { message: String },
}

impl ScoreError {
    /// Create a generic scoring failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Failure while producing an analysis record
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No username was given, or it was empty after cleaning
    #[error("A username is required for analysis")]
    MissingUsername,

    /// Nothing in the batch had scorable text
    #[error("No content found for {platform} user '{username}'")]
    NoContent { username: String, platform: String },

    /// Any other failure, with the original cause attached
    #[error("Failed to analyse content for '{username}'")]
    Aggregate {
        username: String,
        #[source]
        source: ScoreError,
    },
}
