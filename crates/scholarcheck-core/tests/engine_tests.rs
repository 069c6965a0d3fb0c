//! Verification engine integration tests
//!
//! End-to-end scenarios over scripted sources, plus the ordering and
//! degradation guarantees of the engine.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{engine_with, MockSource};
use scholarcheck_core::aggregate::{score, select_best};
use scholarcheck_core::classify::classify;
use scholarcheck_core::strength::verification_strength;
use scholarcheck_core::{
    CandidateRecord, ClaimedPublication, Classification, CsvReportSink, EngineOptions,
    MatchSignals, NameMatchType, Source, SourceError, VerificationResult, VerificationStrength,
};

const ORCID: &str = "0000-0002-1825-0097";

fn signals(sim: f64, name: NameMatchType, doi: bool, anchor: bool) -> MatchSignals {
    MatchSignals {
        title_similarity: sim,
        name_match_type: name,
        doi_present: doi,
        identity_anchor_corroborated: anchor,
    }
}

// === Scenarios ===

#[tokio::test]
async fn test_perfect_match_with_anchor_is_strong_authentic() {
    let title = "Sparse Attention for Long Documents";
    let crossref = MockSource::new(Source::Crossref).answer(
        title,
        vec![CandidateRecord::new(Source::Crossref, title)
            .with_authors(["Jane Doe", "John Smith"])
            .with_doi("10.1234/sparse")
            .with_orcids([ORCID])],
    );
    let engine = engine_with(Some(ORCID), vec![crossref.into_arc()], EngineOptions::default());

    let result = engine.verify(&ClaimedPublication::new(title)).await;
    assert_eq!(result.confidence_score, 100);
    assert_eq!(result.classification, Classification::Authentic);
    assert_eq!(result.verification_strength, VerificationStrength::Strong);
    assert_eq!(result.doi.as_deref(), Some("10.1234/sparse"));
    assert_eq!(result.matched_source, Some(Source::Crossref));
}

#[test]
fn test_partial_name_with_doi_is_moderate_likely_authentic() {
    let s = signals(0.9, NameMatchType::LastnameAndInitials, true, false);
    let classification = classify(score(&s), Some(&s));
    assert_eq!(classification, Classification::LikelyAuthentic);
    assert_eq!(
        verification_strength(classification, Some(&s)),
        VerificationStrength::Moderate
    );
}

#[tokio::test]
async fn test_no_candidates_is_scholar_claimed() {
    let engine = engine_with(
        None,
        vec![
            MockSource::new(Source::Crossref).into_arc(),
            MockSource::new(Source::SemanticScholar).into_arc(),
        ],
        EngineOptions::default(),
    );

    let result = engine.verify(&ClaimedPublication::new("Unindexed Workshop Talk")).await;
    assert_eq!(result.classification, Classification::ScholarClaimed);
    assert_eq!(result.verification_strength, VerificationStrength::Basic);
    assert_eq!(result.doi, None);
    assert_eq!(result.matched_title, None);
    assert_eq!(result.matched_source, None);
}

#[test]
fn test_weak_match_is_likely_misattributed() {
    let s = signals(0.3, NameMatchType::None, false, false);
    assert_eq!(classify(score(&s), Some(&s)), Classification::LikelyMisattributed);
}

#[test]
fn test_near_tie_prefers_crossref() {
    let crossref = CandidateRecord::new(Source::Crossref, "A").with_doi("10.1/a");
    let semantic = CandidateRecord::new(Source::SemanticScholar, "A").with_doi("10.1/a");
    let scored = [
        (&crossref, signals(0.95, NameMatchType::ExactFull, true, false)),
        (&semantic, signals(0.94, NameMatchType::ExactFull, true, false)),
    ];
    assert_eq!(select_best(&scored), Some(0));

    // Same outcome when Semantic Scholar is marginally ahead
    let scored = [
        (&semantic, signals(0.95, NameMatchType::ExactFull, true, false)),
        (&crossref, signals(0.94, NameMatchType::ExactFull, true, false)),
    ];
    assert_eq!(select_best(&scored), Some(1));
}

#[tokio::test]
async fn test_perfect_title_without_author_is_not_authentic() {
    let title = "Quantum Error Correction Thresholds";
    let crossref = MockSource::new(Source::Crossref).answer(
        title,
        vec![CandidateRecord::new(Source::Crossref, title)
            .with_authors(["Someone Else"])
            .with_doi("10.1234/qec")],
    );
    let engine = engine_with(Some(ORCID), vec![crossref.into_arc()], EngineOptions::default());

    let result = engine.verify(&ClaimedPublication::new(title)).await;
    assert_eq!(result.confidence_score, 70);
    assert_eq!(result.classification, Classification::LikelyAuthentic);
    assert_eq!(result.verification_strength, VerificationStrength::Basic);
}

#[tokio::test]
async fn test_best_candidate_across_sources() {
    let title = "Graph Neural Networks for Molecules";
    let crossref = MockSource::new(Source::Crossref).answer(
        title,
        vec![CandidateRecord::new(Source::Crossref, "An Unrelated Survey of Databases")
            .with_doi("10.1/unrelated")],
    );
    let semantic = MockSource::new(Source::SemanticScholar).answer(
        title,
        vec![CandidateRecord::new(Source::SemanticScholar, title)
            .with_authors(["J. Doe"])
            .with_doi("10.1/gnn")],
    );
    let engine = engine_with(
        None,
        vec![crossref.into_arc(), semantic.into_arc()],
        EngineOptions::default(),
    );

    let result = engine.verify(&ClaimedPublication::new(title)).await;
    assert_eq!(result.matched_source, Some(Source::SemanticScholar));
    assert_eq!(result.doi.as_deref(), Some("10.1/gnn"));
    // 60 + 12 + 10
    assert_eq!(result.confidence_score, 82);
    assert_eq!(result.classification, Classification::LikelyAuthentic);
    assert_eq!(result.verification_strength, VerificationStrength::Moderate);
}

// === Degradation ===

#[tokio::test]
async fn test_failing_source_does_not_abort() {
    let title = "Robust Estimation";
    let crossref = MockSource::new(Source::Crossref).failing(SourceError::RateLimited);
    let semantic = MockSource::new(Source::SemanticScholar).answer(
        title,
        vec![CandidateRecord::new(Source::SemanticScholar, title).with_authors(["Jane Doe"])],
    );
    let engine = engine_with(
        None,
        vec![crossref.into_arc(), semantic.into_arc()],
        EngineOptions::default(),
    );

    let result = engine.verify(&ClaimedPublication::new(title)).await;
    assert_eq!(result.matched_source, Some(Source::SemanticScholar));
    assert_eq!(result.classification, Classification::LikelyAuthentic);
}

#[tokio::test]
async fn test_all_sources_failing_degrades_to_scholar_claimed() {
    let engine = engine_with(
        None,
        vec![
            MockSource::new(Source::Crossref)
                .failing(SourceError::SourceUnavailable("connection refused".to_string()))
                .into_arc(),
            MockSource::new(Source::SemanticScholar)
                .failing(SourceError::RateLimited)
                .into_arc(),
        ],
        EngineOptions::default(),
    );

    let result = engine.verify(&ClaimedPublication::new("Anything")).await;
    assert_eq!(result.classification, Classification::ScholarClaimed);
    assert_eq!(
        result.reason,
        "No external bibliographic record found (unavailable: Crossref, SemanticScholar)"
    );
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let title = "Slow Paper";
    let slow = MockSource::new(Source::Crossref)
        .answer(
            title,
            vec![CandidateRecord::new(Source::Crossref, title).with_doi("10.1/slow")],
        )
        .delay(|_| Duration::from_secs(10));
    let options = EngineOptions {
        source_timeout: Duration::from_millis(50),
        ..Default::default()
    };
    let engine = engine_with(None, vec![slow.into_arc()], options);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        engine.verify(&ClaimedPublication::new(title)),
    )
    .await
    .expect("engine must not wait for the slow source");
    assert_eq!(result.classification, Classification::ScholarClaimed);
}

// === Ordering and sinks ===

#[tokio::test]
async fn test_results_follow_input_order() {
    let titles: Vec<String> = (0..8).map(|i| format!("Paper number {}", i)).collect();
    let mut source = MockSource::new(Source::Crossref);
    for title in &titles {
        source = source.answer(
            title,
            vec![CandidateRecord::new(Source::Crossref, title.clone()).with_authors(["Jane Doe"])],
        );
    }
    // Earlier publications finish last
    let source = source.delay(|title| {
        let n: u64 = title.rsplit(' ').next().and_then(|n| n.parse().ok()).unwrap_or(0);
        Duration::from_millis(80 - n * 10)
    });

    let options = EngineOptions {
        concurrency: 8,
        ..Default::default()
    };
    let engine = engine_with(None, vec![source.into_arc()], options);
    let publications: Vec<ClaimedPublication> =
        titles.iter().map(|t| ClaimedPublication::new(t.clone())).collect();

    let mut results: Vec<VerificationResult> = Vec::new();
    let summary = engine.run(&publications, &mut results).await.unwrap();

    let claimed: Vec<&str> = results.iter().map(|r| r.claimed_title.as_str()).collect();
    let expected: Vec<&str> = titles.iter().map(String::as_str).collect();
    assert_eq!(claimed, expected);
    assert_eq!(summary.total, 8);
}

#[tokio::test]
async fn test_run_writes_one_row_per_publication() {
    let matched = "Indexed Paper";
    let source = MockSource::new(Source::Crossref).answer(
        matched,
        vec![CandidateRecord::new(Source::Crossref, matched)
            .with_authors(["Jane Doe"])
            .with_doi("10.1/indexed")],
    );
    let source = std::sync::Arc::new(source);
    let engine = engine_with(
        None,
        vec![source.clone() as std::sync::Arc<dyn scholarcheck_core::CandidateSource>],
        EngineOptions {
            self_check: true,
            ..Default::default()
        },
    );
    let publications = vec![
        ClaimedPublication::new(matched),
        ClaimedPublication::new("Unindexed Talk"),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verification_report_jane_doe.csv");
    let mut sink = CsvReportSink::create(&path).unwrap();
    let summary = engine.run(&publications, &mut sink).await.unwrap();
    drop(sink);

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert!(summary.self_check);
    assert_eq!(summary.count(Classification::Authentic), 1);
    assert_eq!(summary.count(Classification::ScholarClaimed), 1);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Indexed Paper,Indexed Paper,Crossref,10.1/indexed,90,AUTHENTIC,"));
    assert!(lines[2].starts_with("Unindexed Talk,,,,25,SCHOLAR-CLAIMED OUTPUT,Basic (Scholar-only),"));
}
