//! Classification decision table

use crate::domain::Classification;
use crate::signals::MatchSignals;

/// Minimum score for AUTHENTIC
pub const HIGH_THRESHOLD: u8 = 85;
/// Minimum score for LIKELY AUTHENTIC
pub const MEDIUM_THRESHOLD: u8 = 60;

/// Map a score and the selected candidate's signals to a classification
///
/// `signals` is `None` when no source returned a candidate. AUTHENTIC also
/// requires an author-name match and a DOI: title similarity alone never
/// reaches the top label.
pub fn classify(confidence_score: u8, signals: Option<&MatchSignals>) -> Classification {
    let Some(signals) = signals else {
        return Classification::ScholarClaimed;
    };

    if confidence_score >= HIGH_THRESHOLD
        && signals.name_match_type.is_match()
        && signals.doi_present
    {
        Classification::Authentic
    } else if confidence_score >= MEDIUM_THRESHOLD {
        Classification::LikelyAuthentic
    } else {
        Classification::LikelyMisattributed
    }
}
