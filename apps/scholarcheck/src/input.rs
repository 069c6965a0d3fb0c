//! Claimed-publication input files
//!
//! Three formats, chosen by extension:
//! - `.json`: array of `{"title", "authors", "year"}` objects
//! - `.csv`: header row with `title`, optional `authors` (`;`-separated) and `year`
//! - anything else: one title per line, `#` starts a comment

use std::path::Path;

use scholarcheck_core::ClaimedPublication;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    #[serde(default)]
    authors: Option<String>,
    #[serde(default)]
    year: Option<i32>,
}

impl From<CsvRow> for ClaimedPublication {
    fn from(row: CsvRow) -> Self {
        let authors: Vec<String> = row
            .authors
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();

        let mut publication = ClaimedPublication::new(row.title.trim()).with_authors(authors);
        if let Some(year) = row.year {
            publication = publication.with_year(year);
        }
        publication
    }
}

/// Read every claimed publication from `path`, skipping blank titles
pub fn load(path: &Path) -> Result<Vec<ClaimedPublication>> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::input(path, e))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let publications = match extension.as_deref() {
        Some("json") => parse_json(&contents).map_err(|e| CliError::input(path, e))?,
        Some("csv") => parse_csv(&contents).map_err(|e| CliError::input(path, e))?,
        _ => parse_lines(&contents),
    };

    let before = publications.len();
    let publications: Vec<ClaimedPublication> = publications
        .into_iter()
        .filter(|p| !p.title.trim().is_empty())
        .collect();
    if publications.len() < before {
        debug!(skipped = before - publications.len(), "skipped entries without a title");
    }

    if publications.is_empty() {
        return Err(CliError::EmptyInput(path.to_path_buf()));
    }
    Ok(publications)
}

fn parse_json(contents: &str) -> std::result::Result<Vec<ClaimedPublication>, serde_json::Error> {
    serde_json::from_str(contents)
}

fn parse_csv(contents: &str) -> std::result::Result<Vec<ClaimedPublication>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(contents.as_bytes());
    reader
        .deserialize::<CsvRow>()
        .map(|row| row.map(ClaimedPublication::from))
        .collect()
}

fn parse_lines(contents: &str) -> Vec<ClaimedPublication> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ClaimedPublication::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_csv_with_authors_and_year() {
        let csv = "title,authors,year\n\
                   \"Deep Learning, Revisited\",Jane Doe; John Smith,2021\n\
                   A Workshop Talk,,\n";
        let pubs = parse_csv(csv).unwrap();
        assert_eq!(pubs.len(), 2);
        assert_eq!(pubs[0].title, "Deep Learning, Revisited");
        assert_eq!(pubs[0].authors, vec!["Jane Doe", "John Smith"]);
        assert_eq!(pubs[0].year, Some(2021));
        assert!(pubs[1].authors.is_empty());
        assert_eq!(pubs[1].year, None);
    }

    #[test]
    fn test_parse_csv_title_only() {
        let pubs = parse_csv("title\nFirst\nSecond\n").unwrap();
        let titles: Vec<&str> = pubs.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {"title": "A Paper", "authors": ["Jane Doe"], "year": 2020},
            {"title": "Another Paper"}
        ]"#;
        let pubs = parse_json(json).unwrap();
        assert_eq!(pubs.len(), 2);
        assert_eq!(pubs[0].year, Some(2020));
        assert!(pubs[1].authors.is_empty());
    }

    #[test]
    fn test_parse_lines_skips_comments() {
        let pubs = parse_lines("# exported profile\nFirst Title\n\n  Second Title  \n");
        let titles: Vec<&str> = pubs.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First Title", "Second Title"]);
    }

    #[test]
    fn test_load_dispatches_on_extension() {
        let file = write_temp(".CSV", "title,year\nUpper Case Extension,2019\n");
        let pubs = load(file.path()).unwrap();
        assert_eq!(pubs[0].year, Some(2019));

        let file = write_temp(".txt", "Plain Title\n");
        let pubs = load(file.path()).unwrap();
        assert_eq!(pubs[0].title, "Plain Title");
    }

    #[test]
    fn test_load_rejects_empty_input() {
        let file = write_temp(".csv", "title\n   \n");
        assert!(matches!(load(file.path()), Err(CliError::EmptyInput(_))));
    }

    #[test]
    fn test_load_reports_malformed_json() {
        let file = write_temp(".json", "{not json");
        assert!(matches!(load(file.path()), Err(CliError::Input { .. })));
    }
}
