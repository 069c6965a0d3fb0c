//! Shared test doubles

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scholarcheck_core::{
    CandidateRecord, CandidateSource, EngineOptions, IdentityAnchors, ScholarIdentity, Source,
    SourceError, VerificationEngine,
};

/// Scripted source: answers by title, optionally slowly or not at all
pub struct MockSource {
    source: Source,
    answers: Vec<(String, Vec<CandidateRecord>)>,
    delay_for: Box<dyn Fn(&str) -> Duration + Send + Sync>,
    failure: Option<SourceError>,
    pub calls: AtomicUsize,
}

impl MockSource {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            answers: Vec::new(),
            delay_for: Box::new(|_| Duration::ZERO),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answer(mut self, title: &str, records: Vec<CandidateRecord>) -> Self {
        self.answers.push((title.to_string(), records));
        self
    }

    pub fn delay(mut self, delay_for: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay_for = Box::new(delay_for);
        self
    }

    pub fn failing(mut self, error: SourceError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn into_arc(self) -> Arc<dyn CandidateSource> {
        Arc::new(self)
    }
}

#[async_trait]
impl CandidateSource for MockSource {
    fn source(&self) -> Source {
        self.source
    }

    async fn query(
        &self,
        title: &str,
        _authors: &[String],
    ) -> Result<Vec<CandidateRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = (self.delay_for)(title);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self
            .answers
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, records)| records.clone())
            .unwrap_or_default())
    }
}

pub fn identity(orcid: Option<&str>) -> ScholarIdentity {
    let anchors = IdentityAnchors {
        orcid: orcid.map(str::to_string),
        ..Default::default()
    };
    ScholarIdentity::new("Jane Doe", anchors).unwrap()
}

pub fn engine_with(
    orcid: Option<&str>,
    sources: Vec<Arc<dyn CandidateSource>>,
    options: EngineOptions,
) -> VerificationEngine {
    VerificationEngine::new(identity(orcid), sources, options)
}
