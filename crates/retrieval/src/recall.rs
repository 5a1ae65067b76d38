//! HTTP recall-service candidate source.
//!
//! Queries `GET {base_url}/recall?q={query}&k={limit}` and maps each result
//! into a passage. The recall service stores curated memory crystals, so
//! every hit gets the same fixed provenance: manual capture, high authority,
//! single corroboration, one day old.

use std::time::Duration;

use async_trait::async_trait;
use breathrag_core::error::SourceError;
use breathrag_core::passage::{Passage, PassageMetadata};
use breathrag_core::source::CandidateSource;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fallback::DEFAULT_SOURCE_TIMEOUT;

/// Authority assigned to every recalled crystal.
const CRYSTAL_AUTHORITY: f64 = 0.8;

/// A candidate source backed by the recall HTTP service.
pub struct RecallSource {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RecallSource {
    /// Create a recall source with the default timeout (5s).
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(base_url, DEFAULT_SOURCE_TIMEOUT)
    }

    /// Create a recall source whose HTTP client gives up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_transport_error(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            SourceError::Unavailable(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecallResponse {
    #[serde(default)]
    results: Vec<RecallHit>,
}

#[derive(Debug, Deserialize)]
struct RecallHit {
    #[serde(default)]
    anchor: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    crystal_id: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
}

impl RecallHit {
    fn into_passage(self, index: usize) -> Passage {
        let crystal = self
            .crystal_id
            .as_ref()
            .and_then(scalar_to_string)
            .unwrap_or_else(|| "unknown".into());

        Passage::new(
            format!("crystal_{index}"),
            format!("{} {}", self.anchor, self.summary),
            PassageMetadata {
                source: Some(format!("crystal://{crystal}")),
                date: self.timestamp.as_ref().and_then(scalar_to_string),
                method: Some("manual".into()),
                authority: Some(CRYSTAL_AUTHORITY),
                triangulation_count: Some(1),
                risk: Some("general".into()),
                age_days: Some(1),
                ..Default::default()
            },
        )
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl CandidateSource for RecallSource {
    fn name(&self) -> &str {
        "recall"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>, SourceError> {
        let url = format!("{}/recall", self.base_url);

        debug!(url = %url, limit, "Querying recall service");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.to_string()), ("k", limit.to_string())])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Recall service returned error");
            return Err(SourceError::Status {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| self.map_transport_error(e))?;
        let parsed: RecallResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::Malformed(format!("failed to parse recall response: {e}")))?;

        Ok(parsed
            .results
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, hit)| hit.into_passage(i))
            .collect())
    }
}
