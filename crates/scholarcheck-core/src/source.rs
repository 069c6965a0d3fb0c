//! Candidate source capability consumed by the engine

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CandidateRecord, Source};

/// Failure of a single source for a single query
///
/// Never fatal: the engine treats every variant as "zero candidates from this
/// source" for the publication at hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Parse error: {0}")]
    Parse(String),
}

/// An independent bibliographic source
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Which source this adapter queries
    fn source(&self) -> Source;

    /// Look up records that might be the claimed publication
    async fn query(
        &self,
        title: &str,
        authors: &[String],
    ) -> Result<Vec<CandidateRecord>, SourceError>;
}
