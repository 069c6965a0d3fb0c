//! Text normalization for title and author comparison

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Honorifics dropped from the front of author names
const NAME_PREFIXES: [&str; 6] = ["dr", "prof", "professor", "mr", "mrs", "ms"];

/// Generational and degree suffixes dropped from the end of author names
const NAME_SUFFIXES: [&str; 8] = ["jr", "sr", "ii", "iii", "iv", "phd", "md", "esq"];

/// Normalize free text for comparison
///
/// - Unicode NFKD with combining marks removed (diacritics dropped)
/// - Lowercased
/// - Every non-alphanumeric character becomes a space
/// - Whitespace collapsed
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    collapse_whitespace(&folded)
}

/// A person name split into given-name tokens and a family name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub given: Vec<String>,
    pub family: String,
}

impl NameParts {
    /// Parse "Given Family" or "Family, Given" into normalized parts
    ///
    /// Returns `None` when nothing is left after normalization.
    pub fn parse(name: &str) -> Option<Self> {
        let reordered = match name.split_once(',') {
            Some((family, given)) if !given.trim().is_empty() => {
                format!("{} {}", given, family)
            }
            Some((family, _)) => family.to_string(),
            None => name.to_string(),
        };

        let mut tokens: Vec<String> = normalize_text(&reordered)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        while tokens.len() > 1 && NAME_PREFIXES.contains(&tokens[0].as_str()) {
            tokens.remove(0);
        }
        while tokens.len() > 1
            && tokens
                .last()
                .is_some_and(|t| NAME_SUFFIXES.contains(&t.as_str()))
        {
            tokens.pop();
        }

        let family = tokens.pop()?;
        Some(Self {
            given: tokens,
            family,
        })
    }

    /// First letter of each given-name token
    pub fn initials(&self) -> Vec<char> {
        self.given.iter().filter_map(|g| g.chars().next()).collect()
    }

    /// Canonical "given family" form
    pub fn full(&self) -> String {
        let mut parts: Vec<&str> = self.given.iter().map(String::as_str).collect();
        parts.push(&self.family);
        parts.join(" ")
    }
}

/// Collapse runs of whitespace into a single space and trim the ends
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Safe filename fragment for a scholar name ("Jane Q. Doe" -> "jane_q_doe")
pub fn file_slug(name: &str) -> String {
    normalize_text(name).replace(' ', "_")
}
