//! Fuzzy title comparison
//!
//! Titles listed on a scholar profile routinely differ from the indexed
//! record: punctuation, capitalisation, dropped subtitles. The comparator is
//! a token-set ratio over normalized text, so a title that is a token subset
//! of the other still scores 1.0.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

use crate::normalization::normalize_text;

/// A string comparator returning a similarity in `[0, 1]`
pub trait TitleSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Token-set ratio over normalized text
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl TitleSimilarity for TokenSetRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        token_set_ratio(&normalize_text(a), &normalize_text(b))
    }
}

/// Compare two titles with the default comparator
pub fn similarity(a: &str, b: &str) -> f64 {
    TokenSetRatio.similarity(a, b)
}

/// Token-set ratio of two already-normalized strings
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side is a subset of the other (truncated subtitle, extra words)
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 1.0;
    }

    let sect = intersection.join(" ");
    let combined_ab = join_nonempty(&sect, &diff_ab.join(" "));
    let combined_ba = join_nonempty(&sect, &diff_ba.join(" "));

    let mut best = normalized_levenshtein(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(normalized_levenshtein(&sect, &combined_ab))
            .max(normalized_levenshtein(&sect, &combined_ba));
    }

    best.clamp(0.0, 1.0)
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}
