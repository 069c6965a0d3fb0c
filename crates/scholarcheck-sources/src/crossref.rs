//! Crossref adapter
//!
//! API docs: https://api.crossref.org/swagger-ui/index.html
//! Polite pool: identify with `mailto` in the query and the User-Agent.

use async_trait::async_trait;
use scholarcheck_core::anchors::normalize_orcid;
use scholarcheck_core::{CandidateRecord, CandidateSource, Source, SourceError, SourcesConfig};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http::{HttpClient, DEFAULT_USER_AGENT};

const WORKS_URL: &str = "https://api.crossref.org/works";

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefWorkList,
}

#[derive(Debug, Deserialize)]
struct CrossrefWorkList {
    #[serde(default)]
    items: Vec<CrossrefWork>,
}

#[derive(Debug, Deserialize)]
struct CrossrefWork {
    #[serde(rename = "DOI")]
    doi: Option<String>,
    title: Option<Vec<String>>,
    author: Option<Vec<CrossrefAuthor>>,
    #[serde(rename = "published-print")]
    published_print: Option<CrossrefDate>,
    #[serde(rename = "published-online")]
    published_online: Option<CrossrefDate>,
    issued: Option<CrossrefDate>,
}

#[derive(Debug, Deserialize)]
struct CrossrefAuthor {
    given: Option<String>,
    family: Option<String>,
    /// Group authors carry a single name
    name: Option<String>,
    #[serde(rename = "ORCID")]
    orcid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrossrefDate {
    #[serde(rename = "date-parts")]
    date_parts: Option<Vec<Vec<Option<i32>>>>,
}

impl CrossrefDate {
    fn year(&self) -> Option<i32> {
        self.date_parts.as_ref()?.first()?.first().copied().flatten()
    }
}

impl CrossrefAuthor {
    fn display_name(&self) -> Option<String> {
        let given = self.given.as_deref().unwrap_or("").trim();
        let family = self.family.as_deref().unwrap_or("").trim();
        let joined = format!("{} {}", given, family).trim().to_string();
        if !joined.is_empty() {
            return Some(joined);
        }
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

pub struct CrossrefSource {
    http: HttpClient,
    rows: u32,
    mailto: Option<String>,
}

impl CrossrefSource {
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        let user_agent = match &config.mailto {
            Some(mailto) => format!("{} (mailto:{})", DEFAULT_USER_AGENT, mailto),
            None => DEFAULT_USER_AGENT.to_string(),
        };
        let http = HttpClient::new(&user_agent, config.timeout(), config.min_interval())?;

        Ok(Self {
            http,
            rows: config.rows,
            mailto: config.mailto.clone(),
        })
    }

    /// Parse a `/works` search response into candidate records
    ///
    /// Works without a title are skipped.
    pub fn parse_search_response(json: &str) -> Result<Vec<CandidateRecord>, SourceError> {
        let response: CrossrefResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Crossref JSON: {}", e)))?;

        Ok(response
            .message
            .items
            .into_iter()
            .filter_map(Self::parse_work)
            .collect())
    }

    fn parse_work(work: CrossrefWork) -> Option<CandidateRecord> {
        let title = work
            .title
            .and_then(|t| t.into_iter().find(|t| !t.trim().is_empty()))?;

        let authors = work.author.unwrap_or_default();
        let names: Vec<String> = authors.iter().filter_map(CrossrefAuthor::display_name).collect();
        let orcids: Vec<String> = authors
            .iter()
            .filter_map(|a| a.orcid.as_deref())
            .map(normalize_orcid)
            .collect();

        let year = [&work.published_print, &work.published_online, &work.issued]
            .into_iter()
            .flatten()
            .find_map(CrossrefDate::year);

        let mut record = CandidateRecord::new(Source::Crossref, title.trim())
            .with_authors(names)
            .with_orcids(orcids);
        if let Some(doi) = work.doi {
            record = record.with_doi(doi);
        }
        if let Some(year) = year {
            record = record.with_year(year);
        }
        Some(record)
    }

    #[instrument(skip(self, authors), fields(source = "Crossref"))]
    async fn search(
        &self,
        title: &str,
        authors: &[String],
    ) -> Result<Vec<CandidateRecord>, SourceError> {
        let rows = self.rows.to_string();
        let mut params = vec![("query.title", title), ("rows", rows.as_str())];
        if let Some(author) = authors.first() {
            params.push(("query.author", author.as_str()));
        }
        if let Some(mailto) = &self.mailto {
            params.push(("mailto", mailto.as_str()));
        }

        let body = self.http.get_with_params(WORKS_URL, &params, &[]).await?;
        let records = Self::parse_search_response(&body)?;
        debug!(count = records.len(), "Crossref search results");
        Ok(records)
    }
}

#[async_trait]
impl CandidateSource for CrossrefSource {
    fn source(&self) -> Source {
        Source::Crossref
    }

    async fn query(
        &self,
        title: &str,
        authors: &[String],
    ) -> Result<Vec<CandidateRecord>, SourceError> {
        self.search(title, authors).await
    }
}
