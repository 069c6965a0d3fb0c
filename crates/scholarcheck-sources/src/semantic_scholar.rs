//! Semantic Scholar adapter
//!
//! API docs: https://api.semanticscholar.org/api-docs/graph
//! Unauthenticated requests share a small rate limit; an API key raises it.

use async_trait::async_trait;
use scholarcheck_core::{CandidateRecord, CandidateSource, Source, SourceError, SourcesConfig};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http::{HttpClient, DEFAULT_USER_AGENT};

const SEARCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search";
const FIELDS: &str = "title,authors,externalIds,year";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paper {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<PaperAuthor>,
    external_ids: Option<ExternalIds>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PaperAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

pub struct SemanticScholarSource {
    http: HttpClient,
    limit: u32,
    api_key: Option<String>,
}

impl SemanticScholarSource {
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        let http = HttpClient::new(DEFAULT_USER_AGENT, config.timeout(), config.min_interval())?;
        Ok(Self {
            http,
            limit: config.rows,
            api_key: config.semantic_scholar_api_key.clone(),
        })
    }

    /// Parse a `/paper/search` response into candidate records
    pub fn parse_search_response(json: &str) -> Result<Vec<CandidateRecord>, SourceError> {
        let response: SearchResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Semantic Scholar JSON: {}", e)))?;

        Ok(response
            .data
            .into_iter()
            .filter_map(|paper| {
                let title = paper.title.filter(|t| !t.trim().is_empty())?;
                let authors: Vec<String> =
                    paper.authors.into_iter().filter_map(|a| a.name).collect();

                let mut record =
                    CandidateRecord::new(Source::SemanticScholar, title.trim()).with_authors(authors);
                if let Some(doi) = paper.external_ids.and_then(|ids| ids.doi) {
                    record = record.with_doi(doi);
                }
                if let Some(year) = paper.year {
                    record = record.with_year(year);
                }
                Some(record)
            })
            .collect())
    }

    #[instrument(skip(self), fields(source = "SemanticScholar"))]
    async fn search(&self, title: &str) -> Result<Vec<CandidateRecord>, SourceError> {
        let limit = self.limit.to_string();
        let params = [("query", title), ("limit", limit.as_str()), ("fields", FIELDS)];
        let headers: Vec<(&str, &str)> = self
            .api_key
            .as_deref()
            .map(|key| ("x-api-key", key))
            .into_iter()
            .collect();

        let body = self.http.get_with_params(SEARCH_URL, &params, &headers).await?;
        let records = Self::parse_search_response(&body)?;
        debug!(count = records.len(), "Semantic Scholar search results");
        Ok(records)
    }
}

#[async_trait]
impl CandidateSource for SemanticScholarSource {
    fn source(&self) -> Source {
        Source::SemanticScholar
    }

    async fn query(
        &self,
        title: &str,
        _authors: &[String],
    ) -> Result<Vec<CandidateRecord>, SourceError> {
        self.search(title).await
    }
}
