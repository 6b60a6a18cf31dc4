//! Input format detection and document parsing
//!
//! Documents are decoded into `serde_json::Value` first so that JSON, JSON
//! Lines and YAML inputs share one shape-recognition path.

use serde_json::Value;
use std::fmt;
use std::path::Path;

use super::error::{IngestError, IngestResult};
use super::RawContent;

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    JsonLines,
    Yaml,
}

impl InputFormat {
    /// Pick a format from the file extension; unknown extensions are read as JSON
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "jsonl" | "ndjson" => InputFormat::JsonLines,
            "yaml" | "yml" => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::JsonLines => "jsonl",
            InputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode `content` into raw records
pub fn parse_document(content: &str, format: InputFormat, source_name: &str) -> IngestResult<Vec<RawContent>> {
    match format {
        InputFormat::Json => {
            let value: Value = serde_json::from_str(content)
                .map_err(|e| IngestError::malformed(format, source_name, e.to_string()))?;
            records_from_value(value, format, source_name)
        }
        InputFormat::Yaml => {
            let value: Value = serde_yaml::from_str(content)
                .map_err(|e| IngestError::malformed(format, source_name, e.to_string()))?;
            records_from_value(value, format, source_name)
        }
        InputFormat::JsonLines => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                let value: Value = serde_json::from_str(line).map_err(|e| {
                    IngestError::malformed(format, source_name, format!("line {}: {}", index + 1, e))
                })?;
                record_from_value(value, format, source_name)
            })
            .collect(),
    }
}

/// Recognise the top-level shape and extract its records
fn records_from_value(value: Value, format: InputFormat, source_name: &str) -> IngestResult<Vec<RawContent>> {
    match value {
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| record_from_value(entry, format, source_name))
            .collect(),
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                match data {
                    Value::Array(_) => records_from_value(data, format, source_name),
                    Value::Object(mut listing) => match listing.remove("children") {
                        Some(Value::Array(children)) => children
                            .into_iter()
                            .map(|child| listing_child(child, format, source_name))
                            .collect(),
                        _ => Err(unsupported(source_name)),
                    },
                    _ => Err(unsupported(source_name)),
                }
            } else if let Some(items @ Value::Array(_)) = map.remove("items") {
                records_from_value(items, format, source_name)
            } else {
                Err(unsupported(source_name))
            }
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(unsupported(source_name)),
    }
}

/// A Reddit listing child: `{"kind": "t1"|"t3", "data": {...}}`
fn listing_child(child: Value, format: InputFormat, source_name: &str) -> IngestResult<RawContent> {
    let kind = child.get("kind").and_then(Value::as_str).map(str::to_owned);
    let data = child.get("data").cloned().ok_or_else(|| unsupported(source_name))?;
    let mut record = record_from_value(data, format, source_name)?;
    if record.content_type.is_none() {
        record.content_type = kind.as_deref().and_then(super::ContentType::from_reddit_kind);
    }
    Ok(record)
}

fn record_from_value(value: Value, format: InputFormat, source_name: &str) -> IngestResult<RawContent> {
    serde_json::from_value(value).map_err(|e| IngestError::malformed(format, source_name, e.to_string()))
}

fn unsupported(source_name: &str) -> IngestError {
    IngestError::UnsupportedShape {
        source_name: source_name.to_string(),
    }
}
