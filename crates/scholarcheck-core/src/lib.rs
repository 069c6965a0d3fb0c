//! scholarcheck-core: cross-checks a scholar's claimed publications
//!
//! This crate turns noisy bibliographic evidence into bounded, explainable
//! verdicts:
//! - **Signals**: title similarity, author-name match, DOI presence and
//!   identity-anchor corroboration for each candidate record
//! - **Aggregate**: best-candidate selection and a confidence score in `0..=100`
//! - **Classify**: AUTHENTIC / LIKELY AUTHENTIC / SCHOLAR-CLAIMED OUTPUT /
//!   LIKELY MISATTRIBUTED
//! - **Strength**: which signal combination backs the verdict
//! - **Engine**: per-publication orchestration over any set of
//!   [`CandidateSource`]s, with per-source timeouts and ordered output
//! - **Report**: CSV sink and run summary
//!
//! Network adapters live in `scholarcheck-sources`.

pub mod aggregate;
pub mod anchors;
pub mod classify;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod normalization;
pub mod report;
pub mod signals;
pub mod similarity;
pub mod source;
pub mod strength;

pub use anchors::{AnchorKind, IdentityAnchors, ScholarIdentity};
pub use config::{EngineConfig, ScholarConfig, ScholarcheckConfig, SourcesConfig};
pub use domain::{
    CandidateRecord, ClaimedPublication, Classification, Source, VerificationResult,
    VerificationStrength,
};
pub use engine::{EngineOptions, Gathered, VerificationEngine};
pub use error::{AnchorError, ConfigError, ReportError};
pub use report::{CsvReportSink, ResultSink, RunSummary, REPORT_COLUMNS};
pub use signals::{MatchSignals, NameMatchType, SignalExtractor};
pub use similarity::{similarity, TitleSimilarity, TokenSetRatio};
pub use source::{CandidateSource, SourceError};

/// Returns the version of scholarcheck-core
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
