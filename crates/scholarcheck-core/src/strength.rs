//! Verification-strength labels

use crate::domain::{Classification, VerificationStrength};
use crate::signals::MatchSignals;

/// Describe which signals back the verdict
///
/// The label never claims more than the classification: without a candidate
/// it is always Basic, and a LIKELY MISATTRIBUTED record (for example another
/// paper by the same scholar, carrying their ORCID) is never Strong.
pub fn verification_strength(
    classification: Classification,
    signals: Option<&MatchSignals>,
) -> VerificationStrength {
    let supports_strong = !matches!(
        classification,
        Classification::LikelyMisattributed | Classification::ScholarClaimed
    );

    match signals {
        Some(s) if supports_strong && s.identity_anchor_corroborated && s.doi_present => {
            VerificationStrength::Strong
        }
        Some(s) if s.name_match_type.is_match() && s.doi_present => VerificationStrength::Moderate,
        _ => VerificationStrength::Basic,
    }
}
