//! Verification output

use serde::{Deserialize, Serialize};

use super::Source;

/// Final categorical verdict for a claimed publication
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    #[serde(rename = "AUTHENTIC")]
    Authentic,
    #[serde(rename = "LIKELY AUTHENTIC")]
    LikelyAuthentic,
    #[serde(rename = "SCHOLAR-CLAIMED OUTPUT")]
    ScholarClaimed,
    #[serde(rename = "LIKELY MISATTRIBUTED")]
    LikelyMisattributed,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Authentic,
        Classification::LikelyAuthentic,
        Classification::ScholarClaimed,
        Classification::LikelyMisattributed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Authentic => "AUTHENTIC",
            Classification::LikelyAuthentic => "LIKELY AUTHENTIC",
            Classification::ScholarClaimed => "SCHOLAR-CLAIMED OUTPUT",
            Classification::LikelyMisattributed => "LIKELY MISATTRIBUTED",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signal combination drove the verdict
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VerificationStrength {
    #[serde(rename = "Strong (ORCID + DOI)")]
    Strong,
    #[serde(rename = "Moderate (Name + DOI)")]
    Moderate,
    #[serde(rename = "Basic (Scholar-only)")]
    Basic,
}

impl VerificationStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStrength::Strong => "Strong (ORCID + DOI)",
            VerificationStrength::Moderate => "Moderate (Name + DOI)",
            VerificationStrength::Basic => "Basic (Scholar-only)",
        }
    }
}

impl std::fmt::Display for VerificationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the verification report
///
/// Field order is the report column order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VerificationResult {
    pub claimed_title: String,
    pub matched_title: Option<String>,
    pub matched_source: Option<Source>,
    pub doi: Option<String>,
    pub confidence_score: u8,
    pub classification: Classification,
    pub verification_strength: VerificationStrength,
    pub reason: String,
}

impl VerificationResult {
    /// Whether an independent source returned anything for this publication
    pub fn has_match(&self) -> bool {
        self.matched_source.is_some()
    }
}
