//! Content Ingestion
//!
//! Loads posts, tweets and comments exported from Twitter or Reddit and turns
//! them into the `TextItem`s the engine scores. Loading is format-aware (JSON,
//! JSON Lines, YAML); normalisation resolves the text field per platform and
//! applies the recency window and the per-platform count caps.

pub mod error;
pub mod format;
pub mod limits;

pub use error::{IngestError, IngestResult};
pub use format::{parse_document, InputFormat};
pub use limits::AnalysisLimits;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::analyzer::TextItem;
use crate::record::Platform;

/// Path that selects standard input
pub const STDIN_PATH: &str = "-";

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
// Twitter v1.1 style: "Wed Oct 10 20:19:24 +0000 2018"
const LEGACY_TWITTER_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Kind of content a raw record holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Tweet,
    #[serde(alias = "submission")]
    Post,
    Comment,
}

impl ContentType {
    /// Map a Reddit "thing" kind prefix to a content type
    pub fn from_reddit_kind(kind: &str) -> Option<Self> {
        match kind {
            "t3" => Some(ContentType::Post),
            "t1" => Some(ContentType::Comment),
            _ => None,
        }
    }
}

/// Record identifiers arrive as strings or bare integers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Integer(i64),
    Text(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Integer(value) => value.to_string(),
            RawId::Text(value) => value,
        }
    }
}

/// One exported record before normalisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
}

impl RawContent {
    pub fn id_string(&self) -> Option<String> {
        self.id.clone().map(RawId::into_string)
    }

    /// The text to score on `platform`, if any
    pub fn resolve_text(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Twitter => non_blank(&self.text),
            Platform::Reddit => non_blank(&self.text)
                .or_else(|| non_blank(&self.selftext))
                .or_else(|| non_blank(&self.body))
                .or_else(|| non_blank(&self.title)),
        }
    }

    /// Creation time from `created_at`, falling back to `created_utc`
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        if let Some(raw) = self.created_at.as_deref() {
            match parse_timestamp(raw) {
                Some(parsed) => return Some(parsed),
                None => debug!("Unrecognised created_at value: {}", raw),
            }
        }

        self.created_utc.and_then(from_unix_seconds)
    }

    /// Reddit bucket for the count caps; untyped records are posts
    fn is_comment(&self) -> bool {
        self.content_type == Some(ContentType::Comment)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}

/// Parse RFC 3339, naive ISO-8601 (taken as UTC) or legacy Twitter timestamps
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    DateTime::parse_from_str(raw, LEGACY_TWITTER_FORMAT)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Load raw records from a file, or from stdin (as JSON) when `path` is `-`
pub fn load_path(path: &Path) -> IngestResult<Vec<RawContent>> {
    if path.as_os_str() == STDIN_PATH {
        return load_reader(std::io::stdin().lock(), InputFormat::Json, "<stdin>");
    }

    let format = InputFormat::from_path(path);
    debug!("Loading {} content from {}", format, path.display());

    let content = fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&content, format, &path.display().to_string())
}

/// Load raw records from any reader
pub fn load_reader<R: Read>(mut reader: R, format: InputFormat, source_name: &str) -> IngestResult<Vec<RawContent>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| IngestError::Read {
            path: source_name.into(),
            source,
        })?;

    parse_document(&content, format, source_name)
}

/// Turn raw records into scorable items.
///
/// Records without usable text are dropped, records with a known timestamp
/// outside the lookback window are dropped, and the platform's count caps
/// are applied in input order.
pub fn normalize(
    records: Vec<RawContent>,
    platform: Platform,
    limits: &AnalysisLimits,
    now: DateTime<Utc>,
) -> Vec<TextItem> {
    // A window reaching past the earliest representable time keeps everything
    let cutoff = (limits.lookback_days > 0)
        .then(|| Duration::try_days(i64::from(limits.lookback_days)))
        .flatten()
        .and_then(|window| now.checked_sub_signed(window));

    let total = records.len();
    let mut items = Vec::new();
    let mut posts = 0usize;
    let mut comments = 0usize;
    let mut empty = 0usize;
    let mut stale = 0usize;
    let mut over_cap = 0usize;

    for record in records {
        let Some(text) = record.resolve_text(platform) else {
            empty += 1;
            continue;
        };

        let created_at = record.timestamp();
        if let (Some(cutoff), Some(created)) = (cutoff, created_at) {
            if created < cutoff {
                stale += 1;
                continue;
            }
        }

        let admitted = match platform {
            Platform::Twitter => items.len() < limits.max_tweets,
            Platform::Reddit if record.is_comment() => {
                let room = comments < limits.max_reddit_comments;
                comments += usize::from(room);
                room
            }
            Platform::Reddit => {
                let room = posts < limits.max_reddit_posts;
                posts += usize::from(room);
                room
            }
        };

        if !admitted {
            over_cap += 1;
            continue;
        }

        items.push(TextItem::new(record.id_string(), text, created_at));
    }

    debug!(
        "Normalised {} of {} {} records ({} empty, {} outside {} day window, {} over cap)",
        items.len(),
        total,
        platform,
        empty,
        stale,
        limits.lookback_days,
        over_cap
    );

    items
}

/// Load `path` and normalise it for `platform` using the current time
pub fn load_items(path: &Path, platform: Platform, limits: &AnalysisLimits) -> IngestResult<Vec<TextItem>> {
    limits.validate()?;
    let records = load_path(path)?;
    let items = normalize(records, platform, limits, Utc::now());
    if items.is_empty() {
        warn!("No usable content in {}", path.display());
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn raw(text: &str) -> RawContent {
        RawContent {
            text: Some(text.to_string()),
            ..RawContent::default()
        }
    }

    fn comment(body: &str) -> RawContent {
        RawContent {
            body: Some(body.to_string()),
            content_type: Some(ContentType::Comment),
            ..RawContent::default()
        }
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-01T08:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-01T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-01T08:30:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-01T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-01 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("Thu Oct 01 08:30:00 +0000 2026"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_timestamp_falls_back_to_created_utc() {
        let record = RawContent {
            created_at: Some("garbage".to_string()),
            created_utc: Some(1_790_000_000.5),
            ..RawContent::default()
        };
        let ts = record.timestamp().unwrap();
        assert_eq!(ts.timestamp(), 1_790_000_000);
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_resolve_text_per_platform() {
        let record = RawContent {
            selftext: Some("  ".to_string()),
            body: Some("the body".to_string()),
            title: Some("the title".to_string()),
            ..RawContent::default()
        };
        assert_eq!(record.resolve_text(Platform::Twitter), None);
        assert_eq!(record.resolve_text(Platform::Reddit), Some("the body"));

        let titled = RawContent {
            title: Some("only a title".to_string()),
            ..RawContent::default()
        };
        assert_eq!(titled.resolve_text(Platform::Reddit), Some("only a title"));
    }

    #[test]
    fn test_normalize_drops_blank_text() {
        let records = vec![raw("busy"), raw("   "), RawContent::default(), raw("calm")];
        let items = normalize(records, Platform::Twitter, &AnalysisLimits::default(), now());
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["busy", "calm"]);
    }

    #[test]
    fn test_normalize_applies_lookback_window() {
        let old = RawContent {
            created_at: Some("2026-08-01T00:00:00Z".to_string()),
            ..raw("old news")
        };
        let recent = RawContent {
            created_at: Some("2026-10-18T00:00:00Z".to_string()),
            ..raw("recent")
        };
        let undated = raw("undated");

        let items = normalize(
            vec![old.clone(), recent.clone(), undated.clone()],
            Platform::Twitter,
            &AnalysisLimits::default(),
            now(),
        );
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["recent", "undated"]);
        assert!(items[0].created_at.is_some());

        let unbounded = AnalysisLimits::default().with_lookback_days(0);
        let items = normalize(vec![old, recent, undated], Platform::Twitter, &unbounded, now());
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_normalize_huge_lookback_keeps_everything() {
        let ancient = RawContent {
            created_at: Some("1970-01-02T00:00:00Z".to_string()),
            ..raw("ancient")
        };
        let limits = AnalysisLimits::default().with_lookback_days(u32::MAX);
        assert!(limits.validate().is_ok());

        let items = normalize(vec![ancient, raw("undated")], Platform::Twitter, &limits, now());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_normalize_caps_tweets_in_order() {
        let records = (0..5).map(|i| raw(&format!("tweet {}", i))).collect();
        let limits = AnalysisLimits {
            max_tweets: 3,
            ..AnalysisLimits::default()
        };
        let items = normalize(records, Platform::Twitter, &limits, now());
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["tweet 0", "tweet 1", "tweet 2"]);
    }

    #[test]
    fn test_normalize_caps_reddit_buckets_separately() {
        let records = vec![
            raw("post 1"),
            comment("comment 1"),
            raw("post 2"),
            comment("comment 2"),
            raw("post 3"),
            comment("comment 3"),
        ];
        let limits = AnalysisLimits {
            max_reddit_posts: 2,
            max_reddit_comments: 1,
            ..AnalysisLimits::default()
        };
        let items = normalize(records, Platform::Reddit, &limits, now());
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["post 1", "comment 1", "post 2"]);
    }

    #[test]
    fn test_normalize_keeps_ids() {
        let record = RawContent {
            id: Some(RawId::Integer(42)),
            ..raw("hello")
        };
        let items = normalize(vec![record], Platform::Twitter, &AnalysisLimits::default(), now());
        assert_eq!(items[0].id.as_deref(), Some("42"));
    }

    #[test]
    fn test_load_path_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, "{{\"id\": 1, \"text\": \"deadline again\"}}").unwrap();
        writeln!(file, "{{\"id\": 2, \"text\": \"so tired\"}}").unwrap();

        let records = load_path(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id_string().as_deref(), Some("1"));
    }

    #[test]
    fn test_load_path_missing_file() {
        let error = load_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(error, IngestError::Read { .. }));
    }

    #[test]
    fn test_load_items_validates_limits() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[]").unwrap();
        let limits = AnalysisLimits {
            max_tweets: 0,
            ..AnalysisLimits::default()
        };
        let error = load_items(file.path(), Platform::Twitter, &limits).unwrap_err();
        assert!(matches!(error, IngestError::InvalidLimits { .. }));
    }

    #[test]
    fn test_load_reader_yaml() {
        let yaml = "items:\n  - text: so stressed\n    created_at: 2026-10-18T10:00:00Z\n";
        let records = load_reader(yaml.as_bytes(), InputFormat::Yaml, "inline").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].timestamp().is_some());
    }
}
