//! Domain models for scholarcheck
//!
//! Claimed publications come from the scholar's profile, candidate records
//! from independent bibliographic sources, and verification results are the
//! engine's output. All three are immutable once created.

pub mod candidate;
pub mod publication;
pub mod result;

pub use candidate::{CandidateRecord, Source};
pub use publication::ClaimedPublication;
pub use result::{Classification, VerificationResult, VerificationStrength};
