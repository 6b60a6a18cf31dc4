//! Analysis records
//!
//! Wraps a `BatchReport` with who was analysed, from which platform, how the
//! content was obtained and when. This is the shape handed to storage.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use uuid::Uuid;

use crate::analyzer::{round_to, AnalysisError, BatchReport, StressAnalyzer, TextItem};

include!(concat!(env!("OUT_DIR"), "/schema_version.rs"));

/// Social platform the content came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Reddit,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
        }
    }

    /// Strip platform-specific decorations from a username
    pub fn clean_username(self, username: &str) -> String {
        let trimmed = username.trim();
        match self {
            Platform::Twitter => trimmed.trim_start_matches('@').to_string(),
            Platform::Reddit => trimmed.replace("/u/", "").replace("u/", "").trim().to_string(),
        }
    }

    /// Username as it is displayed on the platform
    pub fn display_handle(self, username: &str) -> String {
        match self {
            Platform::Twitter => format!("@{}", username),
            Platform::Reddit => format!("u/{}", username),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "reddit" => Ok(Platform::Reddit),
            _ => Err(format!("Invalid platform: {}. Valid options: twitter, reddit", s)),
        }
    }
}

/// How the analysed content was obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Fetched with the account owner's authorisation
    OAuth,
    /// Username entered by hand
    #[default]
    Manual,
}

impl AnalysisType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisType::OAuth => "oauth",
            AnalysisType::Manual => "manual",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oauth" => Ok(AnalysisType::OAuth),
            "manual" => Ok(AnalysisType::Manual),
            _ => Err(format!("Invalid analysis type: {}. Valid options: oauth, manual", s)),
        }
    }
}

/// A completed analysis, ready to be stored or exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub username_analyzed: String,
    pub platform: Platform,
    pub analysis_type: AnalysisType,
    #[serde(flatten)]
    pub report: BatchReport,
    pub analysis_date: DateTime<Utc>,
    pub processing_time_seconds: f64,
    pub schema_version: i64,
}

impl AnalysisRecord {
    pub fn new(
        username: impl Into<String>,
        platform: Platform,
        analysis_type: AnalysisType,
        report: BatchReport,
        processing_time_seconds: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username_analyzed: username.into(),
            platform,
            analysis_type,
            report,
            analysis_date: Utc::now(),
            processing_time_seconds: round_to(processing_time_seconds, 3),
            schema_version: REPORT_SCHEMA_VERSION,
        }
    }
}

/// Score `items` for `username` and wrap the result in a record.
///
/// Fails when the username is empty after cleaning, when nothing in the batch
/// had scorable text, or when every scored item failed.
pub fn analyze_user(
    analyzer: &StressAnalyzer,
    items: &[TextItem],
    username: &str,
    platform: Platform,
    analysis_type: AnalysisType,
) -> Result<AnalysisRecord, AnalysisError> {
    let username = platform.clean_username(username);
    if username.is_empty() {
        return Err(AnalysisError::MissingUsername);
    }

    let started = Instant::now();
    let outcome = analyzer.score_batch_with_failures(items);
    let elapsed = started.elapsed().as_secs_f64();

    if outcome.report.is_empty() {
        return Err(AnalysisError::NoContent {
            username,
            platform: platform.to_string(),
        });
    }

    if outcome.all_failed() {
        if let Some(source) = outcome.failures.into_iter().next() {
            return Err(AnalysisError::Aggregate { username, source });
        }
    }

    info!(
        "Analysed {} items for {} ({}): {} ({:.3})",
        outcome.report.total_analyzed,
        platform.display_handle(&username),
        platform,
        outcome.report.stress_category,
        outcome.report.stress_level
    );

    Ok(AnalysisRecord::new(username, platform, analysis_type, outcome.report, elapsed))
}
