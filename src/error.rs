//! Error types for temperature analysis and measurement ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the analysis core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A sequence had no elements where at least one is required.
    #[error("{operation} requires at least one value")]
    EmptyInput { operation: &'static str },

    /// A value lies outside the physically or numerically valid range.
    #[error("value {value} is out of domain: {reason}")]
    Domain { value: f64, reason: &'static str },

    /// A timestamp was not strictly greater than its predecessor.
    #[error("timestamp at index {index} is not after the previous sample")]
    UnorderedTimestamps { index: usize },

    /// A date offset runs past the range chrono can represent.
    #[error("day {day} after {start} is not a representable date")]
    DateOutOfRange { start: chrono::NaiveDate, day: usize },
}

impl AnalysisError {
    pub fn empty(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    pub fn domain(value: f64, reason: &'static str) -> Self {
        Self::Domain { value, reason }
    }
}

/// Failures raised while reading a measurements file.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed record; `line` is 1-based.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("station {station}: {source}")]
    Series {
        station: String,
        #[source]
        source: AnalysisError,
    },

    /// A parsing task panicked or was cancelled.
    #[error("parser task failed: {0}")]
    Task(String),
}

impl IngestError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
