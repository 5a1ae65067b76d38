//! End-to-end integration tests for breathrag.
//!
//! These tests exercise the full pipeline from configuration through the
//! candidate source to the serialized retrieval result.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use breathrag_config::{AppConfig, SourceKind};
use breathrag_core::error::SourceError;
use breathrag_core::passage::{Passage, PassageMetadata};
use breathrag_core::source::CandidateSource;
use breathrag_retrieval::{InMemorySource, Retriever, provenance_score};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ──────────────────────────────────────────────────────────────

fn recall_config(url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.source.kind = SourceKind::Recall;
    config.source.url = url.to_string();
    config.source.timeout_secs = 1;
    config
}

fn curated(id: &str, text: &str, tri: u64, age: u64) -> Passage {
    Passage::new(
        id,
        text,
        PassageMetadata {
            source: Some(format!("notes/{id}.md")),
            date: Some("2025-08-01".into()),
            method: Some("manual".into()),
            authority: Some(0.9),
            triangulation_count: Some(tri),
            age_days: Some(age),
            ..Default::default()
        },
    )
}

/// A source that never answers.
struct HangingSource;

#[async_trait::async_trait]
impl CandidateSource for HangingSource {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Passage>, SourceError> {
        std::future::pending().await
    }
}

// ── Recall service ───────────────────────────────────────────────────────

#[tokio::test]
async fn recall_source_end_to_end() {
    let server = MockServer::start().await;

    let results: Vec<_> = (0..30)
        .map(|i| {
            serde_json::json!({
                "anchor": format!("anchor {i}"),
                "summary": "breath pacing keeps drift below the soft threshold ".repeat(4),
                "crystal_id": format!("c{i}"),
                "timestamp": "2025-08-12"
            })
        })
        .collect();

    // z = 0.95 → 8 passages × 3 = 24 requested
    Mock::given(method("GET"))
        .and(path("/recall"))
        .and(query_param("q", "drift"))
        .and(query_param("k", "24"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": results })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let retriever = Retriever::from_config(&recall_config(&server.uri())).unwrap();
    let result = retriever.retrieve("drift", 0.95).await;

    assert_eq!(result.profile.max_passages, 8);
    assert_eq!(result.passages_used, 8);
    assert_eq!(result.selected[0].id, "crystal_0");
    assert_eq!(result.selected[0].source.as_deref(), Some("crystal://c0"));
    assert_eq!(result.stats.p95_age_days, Some(1));
    // crystals carry a single corroboration
    assert_eq!(result.stats.triangulated_pct, 0.0);

    let spent: usize = result.selected.iter().map(|p| p.tokens).sum();
    assert!(spent <= 3200);
}

#[tokio::test]
async fn recall_outage_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recall"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let retriever = Retriever::from_config(&recall_config(&server.uri())).unwrap();
    let result = retriever.retrieve("thresholds", 0.72).await;

    assert_eq!(result.passages_used, 1);
    assert_eq!(result.selected[0].id, "doc_01");
    assert!(result.selected[0].snippet.contains("Query: thresholds"));
}

#[tokio::test]
async fn recall_timeout_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recall"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "results": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let retriever = Retriever::from_config(&recall_config(&server.uri())).unwrap();
    let result = retriever.retrieve("q", 0.5).await;

    assert_eq!(result.passages_used, 1);
    assert_eq!(result.selected[0].id, "doc_01");
}

// ── Other sources ────────────────────────────────────────────────────────

#[tokio::test]
async fn hanging_source_is_cut_off() {
    let retriever = Retriever::new(Arc::new(HangingSource)).with_timeout(Duration::from_millis(50));
    let result = retriever.retrieve("q", 0.9).await;
    assert_eq!(result.selected[0].id, "doc_01");
}

#[tokio::test]
async fn file_source_from_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let passages = vec![
        curated("fresh", &"coherence log entry ".repeat(30), 3, 2),
        curated("stale", &"coherence archive entry ".repeat(30), 2, 300),
        Passage::new(
            "rumor",
            "coherence rumor ".repeat(30),
            PassageMetadata {
                method: Some("asr".into()),
                speculative: Some(true),
                ..Default::default()
            },
        ),
    ];
    write!(file, "{}", serde_json::to_string(&passages).unwrap()).unwrap();

    let mut config = AppConfig::default();
    config.source.kind = SourceKind::File;
    config.source.path = Some(file.path().to_path_buf());

    let retriever = Retriever::from_config(&config).unwrap();
    let result = retriever.retrieve("coherence", 0.81).await;

    let ids: Vec<&str> = result.selected.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["fresh", "stale"]);
    assert_eq!(result.stats.triangulated_pct, 1.0);
    assert_eq!(result.stats.p95_age_days, Some(300));
    assert_eq!(result.z_input, 0.81);
}

#[tokio::test]
async fn missing_file_falls_back() {
    let mut config = AppConfig::default();
    config.source.kind = SourceKind::File;
    config.source.path = Some("/nonexistent/passages.json".into());

    let retriever = Retriever::from_config(&config).unwrap();
    let result = retriever.retrieve("q", 0.5).await;
    assert_eq!(result.selected[0].id, "doc_01");
}

#[tokio::test]
async fn none_source_yields_empty_result() {
    let mut config = AppConfig::default();
    config.source.kind = SourceKind::None;

    let retriever = Retriever::from_config(&config).unwrap();
    let result = retriever.retrieve("anything", 0.5).await;

    assert_eq!(result.passages_used, 0);
    assert_eq!(result.stats.p_median, 0.0);
    assert_eq!(result.stats.triangulated_pct, 0.0);

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["stats"]["p95_age_days"].is_null());
    assert_eq!(json["profile"]["audience_tier"], "middle");
}

// ── Worked scenarios ─────────────────────────────────────────────────────

#[tokio::test]
async fn single_long_passage_fills_base_budget() {
    let source = InMemorySource::new(vec![
        curated("long", &"a".repeat(4000), 3, 0),
        curated("second", &"b".repeat(400), 3, 0),
    ]);
    let retriever = Retriever::new(Arc::new(source));
    let result = retriever.retrieve("", 0.0).await;

    assert_eq!(result.passages_used, 1);
    assert_eq!(result.selected[0].tokens, 900);
    assert_eq!(result.selected[0].snippet.len(), 900);
}

#[tokio::test]
async fn low_quality_passage_is_excluded() {
    let weak = PassageMetadata {
        triangulation_count: Some(0),
        age_days: Some(365),
        authority: Some(0.0),
        method: Some("asr".into()),
        speculative: Some(false),
        ..Default::default()
    };
    let mut speculative = weak.clone();
    speculative.speculative = Some(true);
    assert!((provenance_score(&speculative) - 0.05).abs() < 1e-9);

    let source = InMemorySource::new(vec![Passage::new("weak", "w".repeat(800), speculative)]);
    let result = Retriever::new(Arc::new(source)).retrieve("", 0.95).await;
    assert!(result.selected.is_empty());
}

#[tokio::test]
async fn serialized_result_is_stable() {
    let make = || {
        InMemorySource::new(vec![
            curated("a", &"x".repeat(1200), 3, 10),
            curated("b", &"y".repeat(900), 1, 5),
            curated("c", &"z".repeat(700), 2, 5),
        ])
    };
    let first = Retriever::new(Arc::new(make())).retrieve("", 0.9).await;
    let second = Retriever::new(Arc::new(make())).retrieve("", 0.9).await;
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
