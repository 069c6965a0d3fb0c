//! Match signals for a (claimed publication, candidate record) pair

use serde::{Deserialize, Serialize};

use crate::anchors::{normalize_orcid, ScholarIdentity};
use crate::domain::{CandidateRecord, ClaimedPublication};
use crate::normalization::NameParts;
use crate::similarity::{TitleSimilarity, TokenSetRatio};

/// How well the scholar's name matches the candidate's author list
///
/// Ordered from weakest to strongest so the best author can be taken with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NameMatchType {
    None,
    LastnameAndInitials,
    ExactFull,
}

impl NameMatchType {
    pub fn is_match(&self) -> bool {
        !matches!(self, NameMatchType::None)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            NameMatchType::ExactFull => "exact author name",
            NameMatchType::LastnameAndInitials => "surname and initials match",
            NameMatchType::None => "author not found",
        }
    }
}

/// Individual signals computed fresh for each candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSignals {
    pub title_similarity: f64,
    pub name_match_type: NameMatchType,
    pub doi_present: bool,
    pub identity_anchor_corroborated: bool,
}

/// Computes [`MatchSignals`] on behalf of one scholar
pub struct SignalExtractor<'a, S = TokenSetRatio> {
    identity: &'a ScholarIdentity,
    comparator: S,
}

impl<'a> SignalExtractor<'a> {
    pub fn new(identity: &'a ScholarIdentity) -> Self {
        Self::with_comparator(identity, TokenSetRatio)
    }
}

impl<'a, S: TitleSimilarity> SignalExtractor<'a, S> {
    pub fn with_comparator(identity: &'a ScholarIdentity, comparator: S) -> Self {
        Self {
            identity,
            comparator,
        }
    }

    /// Pure function of its inputs; no I/O
    pub fn extract(&self, claimed: &ClaimedPublication, candidate: &CandidateRecord) -> MatchSignals {
        let raw = self.comparator.similarity(&claimed.title, &candidate.title);
        let title_similarity = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
        let name_match_type = name_match(self.identity.name_parts(), &candidate.authors);
        let doi_present = candidate.doi().is_some();
        let identity_anchor_corroborated =
            anchor_corroborated(self.identity, candidate, name_match_type);

        MatchSignals {
            title_similarity,
            name_match_type,
            doi_present,
            identity_anchor_corroborated,
        }
    }
}

/// Best match of the scholar's name across a candidate's authors
pub fn name_match(scholar: &NameParts, authors: &[String]) -> NameMatchType {
    authors
        .iter()
        .filter_map(|a| NameParts::parse(a))
        .map(|author| match_one(scholar, &author))
        .max()
        .unwrap_or(NameMatchType::None)
}

fn match_one(scholar: &NameParts, author: &NameParts) -> NameMatchType {
    if scholar.full() == author.full() {
        return NameMatchType::ExactFull;
    }
    if scholar.family != author.family {
        return NameMatchType::None;
    }

    let ours = scholar.initials();
    let theirs = author.initials();
    if ours.is_empty() || theirs.is_empty() {
        return NameMatchType::None;
    }
    // First initial must agree; further initials only where both sides have them
    if ours.iter().zip(theirs.iter()).all(|(a, b)| a == b) {
        NameMatchType::LastnameAndInitials
    } else {
        NameMatchType::None
    }
}

/// Whether the candidate is consistent with the supplied identity anchors
///
/// An ORCID listed on the record is direct evidence. Otherwise any supplied
/// anchor corroborates a candidate whose author list names the scholar,
/// unless the record attributes ORCIDs to all of its authors and none is
/// the scholar's.
fn anchor_corroborated(
    identity: &ScholarIdentity,
    candidate: &CandidateRecord,
    name_match_type: NameMatchType,
) -> bool {
    let anchors = &identity.anchors;
    if !anchors.any() {
        return false;
    }

    let listed: Vec<String> = candidate
        .author_orcids
        .iter()
        .map(|o| normalize_orcid(o))
        .collect();

    if let Some(orcid) = &anchors.orcid {
        if listed.iter().any(|o| o == orcid) {
            return true;
        }
        let fully_attributed = !listed.is_empty() && listed.len() >= candidate.authors.len();
        if fully_attributed {
            return false;
        }
    }

    name_match_type.is_match()
}
