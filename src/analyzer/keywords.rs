//! Keyword and pattern tables for the heuristic scorer
//!
//! Keywords are matched as plain substrings of the lowercased text, so short
//! terms also match inside longer words ("tired" inside "retired"). Only the
//! negative patterns use word boundaries. Some terms appear in both stress
//! tables and contribute to both counts.

use regex::Regex;
use std::sync::LazyLock;

/// Terms signalling acute stress
pub const HIGH_STRESS_KEYWORDS: &[&str] = &[
    "overwhelmed", "exhausted", "anxious", "stressed", "panic", "worried",
    "frustrated", "angry", "depressed", "hopeless", "tired", "burnout",
    "can't cope", "breaking point", "mental breakdown", "too much",
    "drowning", "suffocating", "trapped", "stuck", "helpless",
];

/// Terms signalling everyday pressure
pub const MODERATE_STRESS_KEYWORDS: &[&str] = &[
    "busy", "tired", "stressed", "worried", "concerned", "pressure",
    "deadline", "overwhelming", "difficult", "challenging", "struggling",
    "hard time", "not easy", "tough", "rough day", "long day",
];

/// Terms that pull a score back down
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "relaxed", "calm", "peaceful", "happy", "content", "grateful",
    "blessed", "excited", "motivated", "energized", "positive",
];

/// Negative phrasing patterns, each contributing independently
pub const NEGATIVE_PATTERN_SOURCES: &[&str] = &[
    r"\b(no|not|never|can't|won't|don't|isn't|aren't)\b",
    r"\b(why|how|what)\s+(is|are|was|were)\s+wrong",
    r"\b(feel|feeling)\s+(bad|terrible|awful|horrible)",
    r"\b(hate|dislike|annoyed|irritated)",
];

/// Marker recorded in `indicators_found` for every matching negative pattern
pub const NEGATIVE_PATTERN_MARKER: &str = "negative_pattern";

static NEGATIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NEGATIVE_PATTERN_SOURCES
        .iter()
        .map(|source| Regex::new(source).expect("built-in negative pattern must compile"))
        .collect()
});

/// Compiled negative patterns, in table order
pub fn negative_patterns() -> &'static [Regex] {
    &NEGATIVE_PATTERNS
}

/// Keywords from `table` that occur in `text_lower`, in table order
pub fn matching_keywords<'a>(table: &[&'a str], text_lower: &str) -> Vec<&'a str> {
    table
        .iter()
        .copied()
        .filter(|keyword| text_lower.contains(keyword))
        .collect()
}
