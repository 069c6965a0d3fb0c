//! scholarcheck-sources: network adapters for the verification engine
//!
//! Each adapter implements [`CandidateSource`] over one public bibliographic
//! API. Failures never escape as panics; they surface as [`SourceError`]
//! and the engine degrades to zero candidates for that source.

pub mod crossref;
pub mod http;
pub mod semantic_scholar;

use std::sync::Arc;

pub use crossref::CrossrefSource;
pub use http::HttpClient;
pub use scholarcheck_core::{CandidateSource, SourceError};
pub use semantic_scholar::SemanticScholarSource;

use scholarcheck_core::SourcesConfig;

/// Instantiate every source enabled in `config`, Crossref first
pub fn build_sources(config: &SourcesConfig) -> Result<Vec<Arc<dyn CandidateSource>>, SourceError> {
    let mut sources: Vec<Arc<dyn CandidateSource>> = Vec::new();
    if config.crossref {
        sources.push(Arc::new(CrossrefSource::new(config)?));
    }
    if config.semantic_scholar {
        sources.push(Arc::new(SemanticScholarSource::new(config)?));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scholarcheck_core::Source;

    #[rstest]
    #[case(true, true, vec![Source::Crossref, Source::SemanticScholar])]
    #[case(true, false, vec![Source::Crossref])]
    #[case(false, true, vec![Source::SemanticScholar])]
    #[case(false, false, vec![])]
    fn test_build_sources(
        #[case] crossref: bool,
        #[case] semantic_scholar: bool,
        #[case] expected: Vec<Source>,
    ) {
        let config = SourcesConfig {
            crossref,
            semantic_scholar,
            ..Default::default()
        };
        let sources = build_sources(&config).unwrap();
        let kinds: Vec<Source> = sources.iter().map(|s| s.source()).collect();
        assert_eq!(kinds, expected);
    }
}
