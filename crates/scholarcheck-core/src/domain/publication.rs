//! Claimed publication representation

use serde::{Deserialize, Serialize};

/// A publication as listed on the scholar's own profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClaimedPublication {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl ClaimedPublication {
    /// Create a claimed publication with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            year: None,
        }
    }

    /// Builder method to add authors
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to add a year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}
