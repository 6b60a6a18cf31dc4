//! Report rendering
//!
//! Turns finished `AnalysisRecord`s into text tables, compact one-liners,
//! JSON, YAML or CSV, and writes the result to stdout or a file.

pub mod compact;
pub mod csv;
pub mod text;

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::display::{ColourManager, CompactFormat};
use crate::record::AnalysisRecord;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to encode report as JSON")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode report as YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to encode report as CSV")]
    Csv(#[from] ::csv::Error),

    #[error("Failed to write report to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Compact,
    Json,
    Yaml,
    Csv,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Compact => "compact",
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
            ReportFormat::Csv => "csv",
        }
    }

    /// Machine-readable formats are never coloured
    pub fn supports_colour(self) -> bool {
        self == ReportFormat::Text
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "compact" => Ok(ReportFormat::Compact),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Invalid format: {}. Valid options: text, compact, json, yaml, csv",
                s
            )),
        }
    }
}

/// Render `records` in `format`.
///
/// JSON and YAML emit a single object for one record and a list otherwise.
pub fn render(records: &[AnalysisRecord], format: ReportFormat, colours: &ColourManager) -> Result<String, OutputError> {
    let rendered = match format {
        ReportFormat::Text => text::render_records(records, colours),
        ReportFormat::Compact => records
            .iter()
            .map(|record| record.to_compact_format() + "\n")
            .collect(),
        ReportFormat::Json => {
            let mut json = match records {
                [single] => serde_json::to_string_pretty(single)?,
                _ => serde_json::to_string_pretty(records)?,
            };
            json.push('\n');
            json
        }
        ReportFormat::Yaml => match records {
            [single] => serde_yaml::to_string(single)?,
            _ => serde_yaml::to_string(records)?,
        },
        ReportFormat::Csv => csv::render_records(records)?,
    };

    Ok(rendered)
}

/// Write rendered output to `destination`, or stdout when absent
pub fn write_report(content: &str, destination: Option<&Path>) -> Result<(), OutputError> {
    match destination {
        Some(path) => fs::write(path, content).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|source| OutputError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_record;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("YML".parse::<ReportFormat>().unwrap(), ReportFormat::Yaml);
        assert_eq!("Compact".parse::<ReportFormat>().unwrap(), ReportFormat::Compact);
        assert!("html".parse::<ReportFormat>().is_err());
        assert!(ReportFormat::Text.supports_colour());
        assert!(!ReportFormat::Csv.supports_colour());
    }

    #[test]
    fn test_render_json_single_and_many() {
        let colours = ColourManager::with_colours(false);
        let alice = sample_record("alice", &["so overwhelmed", "calm day"]);
        let bob = sample_record("bob", &["deadline"]);

        let single = render(std::slice::from_ref(&alice), ReportFormat::Json, &colours).unwrap();
        let value: serde_json::Value = serde_json::from_str(&single).unwrap();
        assert_eq!(value["username_analyzed"], "alice");
        assert_eq!(value["total_analyzed"], 2);

        let many = render(&[alice, bob], ReportFormat::Json, &colours).unwrap();
        let value: serde_json::Value = serde_json::from_str(&many).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["stress_category"], "low");
    }

    #[test]
    fn test_render_yaml_round_trips() {
        let colours = ColourManager::with_colours(false);
        let record = sample_record("carol", &["panic", "burnout"]);
        let yaml = render(std::slice::from_ref(&record), ReportFormat::Yaml, &colours).unwrap();
        let parsed: AnalysisRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.report.stress_level, record.report.stress_level);
    }

    #[test]
    fn test_render_compact_one_line_per_record() {
        let colours = ColourManager::with_colours(false);
        let records = [sample_record("a", &["busy"]), sample_record("b", &["calm"])];
        let output = render(&records, ReportFormat::Compact, &colours).unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        write_report("hello\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");

        let missing = dir.path().join("no/such/dir/report.txt");
        assert!(matches!(
            write_report("x", Some(&missing)),
            Err(OutputError::Write { .. })
        ));
    }
}
