//! Error types for scholarcheck-core
//!
//! Only configuration and report-writing problems surface as errors.
//! Per-publication failures (unreachable sources, empty results) never do.

use thiserror::Error;

use crate::anchors::AnchorKind;

/// Configuration validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Config file could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identity anchor errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// Anchor failed basic format validation
    #[error("Malformed {kind}: {value:?}")]
    Malformed { kind: AnchorKind, value: String },
}

/// Report sink errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
