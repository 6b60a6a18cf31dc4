//! Ingestion Error Types

use std::path::PathBuf;
use thiserror::Error;

use super::format::InputFormat;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while loading or normalising content
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input could not be read
    #[error("Failed to read input {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid in its detected format
    #[error("Malformed {format} document in {source_name}: {message}")]
    Malformed {
        format: InputFormat,
        source_name: String,
        message: String,
    },

    /// The document parsed but holds no recognisable list of records
    #[error("Unsupported document shape in {source_name}: expected an array of records, an object with a 'data' or 'items' array, or a Reddit listing")]
    UnsupportedShape { source_name: String },

    /// Count or recency bounds are unusable
    #[error("Invalid analysis limits: {message}")]
    InvalidLimits { message: String },
}

impl IngestError {
    pub fn malformed(format: InputFormat, source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_limits(message: impl Into<String>) -> Self {
        Self::InvalidLimits {
            message: message.into(),
        }
    }
}
