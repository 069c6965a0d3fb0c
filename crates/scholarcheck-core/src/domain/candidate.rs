//! Candidate records returned by independent bibliographic sources

use serde::{Deserialize, Serialize};

/// Independent source a candidate record came from
///
/// Declaration order is the tie-break preference: Crossref wins over
/// Semantic Scholar when candidates are otherwise equivalent.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Crossref,
    SemanticScholar,
}

impl Source {
    /// Get string representation used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Crossref => "Crossref",
            Source::SemanticScholar => "SemanticScholar",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bibliographic entry proposed as a match for a claimed publication
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    pub source: Source,
    pub title: String,
    pub authors: Vec<String>,
    pub doi: Option<String>,
    pub year: Option<i32>,
    /// ORCID iDs attached to the record's authors, when the source exposes them
    #[serde(default)]
    pub author_orcids: Vec<String>,
}

impl CandidateRecord {
    pub fn new(source: Source, title: impl Into<String>) -> Self {
        Self {
            source,
            title: title.into(),
            authors: Vec::new(),
            doi: None,
            year: None,
            author_orcids: Vec::new(),
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_orcids<I, S>(mut self, orcids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_orcids = orcids.into_iter().map(Into::into).collect();
        self
    }

    /// The DOI, if the record carries a non-blank one
    pub fn doi(&self) -> Option<&str> {
        self.doi
            .as_deref()
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
    }
}
