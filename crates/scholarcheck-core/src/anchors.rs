//! Identity anchors: ORCID, Scopus Author ID, ResearcherID
//!
//! Anchors are run-scoped. A value that fails format validation is reported
//! once and then treated as absent; it never aborts the run.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AnchorError, ConfigError};
use crate::normalization::NameParts;

lazy_static! {
    static ref ORCID_PATTERN: Regex = Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").unwrap();
    static ref SCOPUS_PATTERN: Regex = Regex::new(r"^\d{10,11}$").unwrap();
    // Legacy "A-1234-2008" and current "ABC-1234-2020" forms
    static ref RESEARCHER_ID_PATTERN: Regex = Regex::new(r"^[A-Z]{1,3}-\d{4}-\d{4}$").unwrap();
}

const ORCID_PREFIXES: [&str; 4] = [
    "https://orcid.org/",
    "http://orcid.org/",
    "orcid.org/",
    "orcid:",
];

/// Kind of identity anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorKind {
    Orcid,
    ScopusId,
    ResearcherId,
}

impl std::fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorKind::Orcid => write!(f, "ORCID iD"),
            AnchorKind::ScopusId => write!(f, "Scopus Author ID"),
            AnchorKind::ResearcherId => write!(f, "ResearcherID"),
        }
    }
}

/// Validated, run-scoped identity anchors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAnchors {
    pub orcid: Option<String>,
    pub scopus_id: Option<String>,
    pub researcher_id: Option<String>,
}

impl IdentityAnchors {
    /// Validate raw anchor values
    ///
    /// Blank values count as not supplied. Malformed values are dropped and
    /// returned alongside the anchors that survived.
    pub fn validate(
        orcid: Option<&str>,
        scopus_id: Option<&str>,
        researcher_id: Option<&str>,
    ) -> (Self, Vec<AnchorError>) {
        let mut errors = Vec::new();

        let mut keep = |kind: AnchorKind, raw: Option<&str>| -> Option<String> {
            let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
            match normalize_anchor(kind, raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    errors.push(err);
                    None
                }
            }
        };

        let anchors = Self {
            orcid: keep(AnchorKind::Orcid, orcid),
            scopus_id: keep(AnchorKind::ScopusId, scopus_id),
            researcher_id: keep(AnchorKind::ResearcherId, researcher_id),
        };

        (anchors, errors)
    }

    /// Validate and log each rejected value once at `warn`
    pub fn validate_and_report(
        orcid: Option<&str>,
        scopus_id: Option<&str>,
        researcher_id: Option<&str>,
    ) -> Self {
        let (anchors, errors) = Self::validate(orcid, scopus_id, researcher_id);
        for err in errors {
            warn!("{}; ignoring it for scoring", err);
        }
        anchors
    }

    /// Whether any anchor was supplied and passed validation
    pub fn any(&self) -> bool {
        self.orcid.is_some() || self.scopus_id.is_some() || self.researcher_id.is_some()
    }
}

/// Check one anchor value and return its canonical form
pub fn normalize_anchor(kind: AnchorKind, raw: &str) -> Result<String, AnchorError> {
    let malformed = || AnchorError::Malformed {
        kind,
        value: raw.to_string(),
    };

    match kind {
        AnchorKind::Orcid => {
            let orcid = normalize_orcid(raw);
            if is_valid_orcid(&orcid) {
                Ok(orcid)
            } else {
                Err(malformed())
            }
        }
        AnchorKind::ScopusId => {
            let id = raw.trim();
            if SCOPUS_PATTERN.is_match(id) {
                Ok(id.to_string())
            } else {
                Err(malformed())
            }
        }
        AnchorKind::ResearcherId => {
            let id = raw.trim().to_uppercase();
            if RESEARCHER_ID_PATTERN.is_match(&id) {
                Ok(id)
            } else {
                Err(malformed())
            }
        }
    }
}

/// Strip resolver prefixes and upper-case the check character
pub fn normalize_orcid(raw: &str) -> String {
    let mut result = raw.trim();
    for prefix in ORCID_PREFIXES {
        if let Some(stripped) = result.strip_prefix(prefix) {
            result = stripped;
            break;
        }
    }
    result.to_uppercase()
}

/// Format and ISO 7064 MOD 11-2 checksum validation for a bare ORCID iD
pub fn is_valid_orcid(orcid: &str) -> bool {
    if !ORCID_PATTERN.is_match(orcid) {
        return false;
    }

    let digits: Vec<char> = orcid.chars().filter(|c| *c != '-').collect();
    let (body, check) = digits.split_at(15);

    let mut total: u32 = 0;
    for c in body {
        match c.to_digit(10) {
            Some(d) => total = (total + d) * 2,
            None => return false,
        }
    }
    let expected = (12 - total % 11) % 11;
    let expected = if expected == 10 {
        'X'
    } else {
        char::from_digit(expected, 10).unwrap_or('?')
    };

    check[0] == expected
}

/// The profile owner: full name plus validated anchors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarIdentity {
    pub name: String,
    parts: NameParts,
    pub anchors: IdentityAnchors,
}

impl ScholarIdentity {
    /// Build the identity; a blank or unparseable name is a configuration failure
    pub fn new(name: impl Into<String>, anchors: IdentityAnchors) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        let parts = NameParts::parse(&name)
            .ok_or_else(|| ConfigError::MissingField("scholar.name".to_string()))?;
        Ok(Self {
            name,
            parts,
            anchors,
        })
    }

    pub fn name_parts(&self) -> &NameParts {
        &self.parts
    }
}
