//! Verification engine
//!
//! Drives the pipeline once per claimed publication: gather candidates from
//! every configured source, extract signals, pick the best candidate, score,
//! classify and label. Publications run concurrently, results come out in
//! input order.

use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::aggregate::{score, select_best, UNVERIFIABLE_SCORE};
use crate::anchors::ScholarIdentity;
use crate::classify::classify;
use crate::config::ScholarcheckConfig;
use crate::domain::{CandidateRecord, ClaimedPublication, Source, VerificationResult};
use crate::error::ReportError;
use crate::report::{ResultSink, RunSummary};
use crate::signals::{MatchSignals, SignalExtractor};
use crate::source::CandidateSource;
use crate::strength::verification_strength;

const NO_RECORD_REASON: &str = "No external bibliographic record found";

/// Engine tuning
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Publications evaluated concurrently
    pub concurrency: usize,
    /// Timeout applied to each source call independently
    pub source_timeout: Duration,
    /// Carried into the run summary
    pub self_check: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            source_timeout: Duration::from_secs(30),
            self_check: false,
        }
    }
}

impl From<&ScholarcheckConfig> for EngineOptions {
    fn from(config: &ScholarcheckConfig) -> Self {
        Self {
            concurrency: config.engine.concurrency,
            source_timeout: config.sources.timeout(),
            self_check: config.scholar.self_check,
        }
    }
}

/// Candidates gathered for one publication
#[derive(Debug, Clone, Default)]
pub struct Gathered {
    /// In source order, then in the order each source returned them
    pub candidates: Vec<CandidateRecord>,
    /// Sources that failed or timed out
    pub unavailable: Vec<Source>,
}

pub struct VerificationEngine {
    identity: ScholarIdentity,
    sources: Vec<Arc<dyn CandidateSource>>,
    options: EngineOptions,
}

impl VerificationEngine {
    pub fn new(
        identity: ScholarIdentity,
        sources: Vec<Arc<dyn CandidateSource>>,
        options: EngineOptions,
    ) -> Self {
        Self {
            identity,
            sources,
            options,
        }
    }

    pub fn identity(&self) -> &ScholarIdentity {
        &self.identity
    }

    /// Score a publication against an already-gathered candidate set
    ///
    /// Deterministic: the same publication, candidates and identity always
    /// yield the same result.
    pub fn evaluate(
        &self,
        claimed: &ClaimedPublication,
        candidates: &[CandidateRecord],
    ) -> VerificationResult {
        let extractor = SignalExtractor::new(&self.identity);
        let scored: Vec<(&CandidateRecord, MatchSignals)> = candidates
            .iter()
            .map(|candidate| (candidate, extractor.extract(claimed, candidate)))
            .collect();

        let Some(best) = select_best(&scored) else {
            let classification = classify(UNVERIFIABLE_SCORE, None);
            return VerificationResult {
                claimed_title: claimed.title.clone(),
                matched_title: None,
                matched_source: None,
                doi: None,
                confidence_score: UNVERIFIABLE_SCORE,
                classification,
                verification_strength: verification_strength(classification, None),
                reason: NO_RECORD_REASON.to_string(),
            };
        };

        let (candidate, signals) = scored[best];
        let confidence_score = score(&signals);
        let classification = classify(confidence_score, Some(&signals));

        VerificationResult {
            claimed_title: claimed.title.clone(),
            matched_title: Some(candidate.title.clone()),
            matched_source: Some(candidate.source),
            doi: candidate.doi().map(str::to_string),
            confidence_score,
            classification,
            verification_strength: verification_strength(classification, Some(&signals)),
            reason: explain(candidate.source, &signals),
        }
    }

    /// Ask every source concurrently; failures and timeouts yield nothing
    pub async fn gather(&self, claimed: &ClaimedPublication) -> Gathered {
        let calls = self.sources.iter().map(|source| async move {
            let outcome = tokio::time::timeout(
                self.options.source_timeout,
                source.query(&claimed.title, &claimed.authors),
            )
            .await;
            (source.source(), outcome)
        });

        let mut gathered = Gathered::default();
        for (source, outcome) in join_all(calls).await {
            match outcome {
                Ok(Ok(records)) => {
                    debug!(%source, count = records.len(), "source returned candidates");
                    gathered.candidates.extend(records);
                }
                Ok(Err(err)) => {
                    warn!(%source, title = %claimed.title, "{}; continuing without it", err);
                    gathered.unavailable.push(source);
                }
                Err(_) => {
                    warn!(
                        %source,
                        title = %claimed.title,
                        timeout_secs = self.options.source_timeout.as_secs_f64(),
                        "source timed out; continuing without it"
                    );
                    gathered.unavailable.push(source);
                }
            }
        }
        gathered
    }

    /// Full pipeline for one publication; always yields exactly one result
    pub async fn verify(&self, claimed: &ClaimedPublication) -> VerificationResult {
        let gathered = self.gather(claimed).await;
        let mut result = self.evaluate(claimed, &gathered.candidates);

        if !result.has_match() && !gathered.unavailable.is_empty() {
            let names: Vec<&str> = gathered.unavailable.iter().map(Source::as_str).collect();
            result.reason = format!("{} (unavailable: {})", NO_RECORD_REASON, names.join(", "));
        }
        result
    }

    /// Results for every publication, in input order
    pub fn verify_all<'a>(
        &'a self,
        publications: &'a [ClaimedPublication],
    ) -> impl Stream<Item = VerificationResult> + 'a {
        stream::iter(publications)
            .map(move |claimed| self.verify(claimed))
            .buffered(self.options.concurrency.max(1))
    }

    /// Verify every publication and append each result to `sink`
    ///
    /// The engine is the sink's only writer. If this future is dropped part
    /// way through, every result appended so far stays written.
    pub async fn run<S: ResultSink + ?Sized>(
        &self,
        publications: &[ClaimedPublication],
        sink: &mut S,
    ) -> Result<RunSummary, ReportError> {
        info!(
            scholar = %self.identity.name,
            publications = publications.len(),
            sources = self.sources.len(),
            concurrency = self.options.concurrency,
            "starting verification run"
        );

        let mut summary = RunSummary::new(self.options.self_check);
        let mut results = pin!(self.verify_all(publications));
        while let Some(result) = results.next().await {
            sink.append(&result)?;
            summary.record(&result);
        }
        sink.finish()?;

        info!(total = summary.total, "verification run complete");
        Ok(summary)
    }
}

/// Human-readable explanation of a matched candidate's signals
fn explain(source: Source, signals: &MatchSignals) -> String {
    let mut parts = vec![
        format!("title {:.0}%", signals.title_similarity * 100.0),
        signals.name_match_type.describe().to_string(),
    ];
    parts.push(if signals.doi_present {
        "DOI present".to_string()
    } else {
        "no DOI".to_string()
    });
    if signals.identity_anchor_corroborated {
        parts.push("identity anchor corroborated".to_string());
    }
    format!("{}: {}", source, parts.join("; "))
}
