//! Candidate selection and bounded confidence scoring
//!
//! Weights sum to 100, so a candidate matching on every signal scores 100
//! before clamping. Title similarity carries most of the weight: without a
//! title match the other bonuses top out at 40.

use crate::domain::{CandidateRecord, Source};
use crate::signals::{MatchSignals, NameMatchType};

/// Points for a perfect title match, scaled by similarity
pub const W_TITLE: f64 = 60.0;
/// Scholar's full name found verbatim among the authors
pub const W_NAME_EXACT: f64 = 20.0;
/// Surname and initials match
pub const W_NAME_PARTIAL: f64 = 12.0;
/// Candidate carries a DOI
pub const W_DOI: f64 = 10.0;
/// Identity anchor corroborated by the candidate
pub const W_ANCHOR: f64 = 10.0;

/// Score for a publication no independent source could find
///
/// Low, but not zero: "listed but unverifiable" is not a confirmed mismatch.
pub const UNVERIFIABLE_SCORE: u8 = 25;

/// Similarity gap under which two candidates count as tied
pub const NEAR_TIE_BAND: f64 = 0.02;

/// Combine signals into a confidence score in `0..=100`
///
/// The anchor bonus only applies when the extractor marked the candidate as
/// corroborated, which already implies anchors were supplied.
pub fn score(signals: &MatchSignals) -> u8 {
    let name_bonus = match signals.name_match_type {
        NameMatchType::ExactFull => W_NAME_EXACT,
        NameMatchType::LastnameAndInitials => W_NAME_PARTIAL,
        NameMatchType::None => 0.0,
    };
    let doi_bonus = if signals.doi_present { W_DOI } else { 0.0 };
    let anchor_bonus = if signals.identity_anchor_corroborated {
        W_ANCHOR
    } else {
        0.0
    };

    let title_points = signals.title_similarity.clamp(0.0, 1.0) * W_TITLE;
    let total = title_points + name_bonus + doi_bonus + anchor_bonus;
    total.clamp(0.0, 100.0).round() as u8
}

/// Index of the best candidate, or `None` for an empty slice
///
/// Tie-break order:
/// 1. highest title similarity
/// 2. within [`NEAR_TIE_BAND`] of the top, a candidate with a DOI
/// 3. then Crossref over Semantic Scholar
/// 4. then first seen
pub fn select_best(scored: &[(&CandidateRecord, MatchSignals)]) -> Option<usize> {
    let top = scored
        .iter()
        .map(|(_, s)| s.title_similarity)
        .fold(f64::NEG_INFINITY, f64::max);

    scored
        .iter()
        .enumerate()
        .filter(|(_, (_, s))| top - s.title_similarity < NEAR_TIE_BAND)
        .min_by_key(|(index, (candidate, s))| {
            (!s.doi_present, source_rank(candidate.source), *index)
        })
        .map(|(index, _)| index)
}

fn source_rank(source: Source) -> u8 {
    match source {
        Source::Crossref => 0,
        Source::SemanticScholar => 1,
    }
}
