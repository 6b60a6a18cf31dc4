//! Count and recency bounds applied while normalising content

use super::error::{IngestError, IngestResult};

pub const DEFAULT_MAX_TWEETS: usize = 100;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
pub const DEFAULT_MAX_REDDIT_POSTS: usize = 100;
pub const DEFAULT_MAX_REDDIT_COMMENTS: usize = 50;

/// How much content is kept per analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisLimits {
    pub max_tweets: usize,
    /// Window in days; 0 keeps content of any age
    pub lookback_days: u32,
    pub max_reddit_posts: usize,
    pub max_reddit_comments: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_tweets: DEFAULT_MAX_TWEETS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_reddit_posts: DEFAULT_MAX_REDDIT_POSTS,
            max_reddit_comments: DEFAULT_MAX_REDDIT_COMMENTS,
        }
    }
}

impl AnalysisLimits {
    /// Apply one item cap to every platform bucket
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_tweets = max_items;
        self.max_reddit_posts = max_items;
        self.max_reddit_comments = max_items;
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn validate(&self) -> IngestResult<()> {
        if self.max_tweets == 0 {
            return Err(IngestError::invalid_limits("max-tweets must be greater than zero"));
        }

        if self.max_reddit_posts == 0 && self.max_reddit_comments == 0 {
            return Err(IngestError::invalid_limits(
                "max-reddit-posts and max-reddit-comments cannot both be zero",
            ));
        }

        Ok(())
    }
}
