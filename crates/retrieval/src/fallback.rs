//! Resilient candidate fetching — bounded timeout with a fixed fallback set.
//!
//! When the wrapped source fails (error, non-success status, malformed body)
//! or does not answer within the timeout, the caller gets
//! [`fallback_passages`] instead of an error. Retrieval never fails because
//! the candidate store is down.

use std::sync::Arc;
use std::time::Duration;

use breathrag_core::error::SourceError;
use breathrag_core::passage::{Passage, PassageMetadata};
use breathrag_core::source::CandidateSource;
use tracing::{debug, warn};

/// Default upper bound on a single candidate fetch.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(5);

/// The deterministic passage set used when the candidate source is unavailable.
///
/// Returns a fresh value on every call; the query is echoed into the text so
/// the substitution is visible downstream.
pub fn fallback_passages(query: &str) -> Vec<Passage> {
    vec![Passage::new(
        "doc_01",
        format!(
            "IDDR thresholds: soft=0.02, moderate=0.05, hard=0.09, critical=0.12. Query: {query}"
        ),
        PassageMetadata {
            source: Some("docs/iddr_spec_v1.md".into()),
            date: Some("2025-08-13".into()),
            method: Some("manual".into()),
            authority: Some(0.9),
            triangulation_count: Some(3),
            risk: Some("general".into()),
            age_days: Some(1),
            ..Default::default()
        },
    )]
}

/// Wraps a [`CandidateSource`] with a timeout and fallback substitution.
pub struct ResilientSource {
    inner: Arc<dyn CandidateSource>,
    timeout: Duration,
}

impl ResilientSource {
    /// Wrap a source with the default timeout (5s).
    pub fn new(inner: Arc<dyn CandidateSource>) -> Self {
        Self {
            inner,
            timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    /// Override the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the wrapped source.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch candidates, substituting the fallback set on any failure.
    pub async fn fetch(&self, query: &str, limit: usize) -> Vec<Passage> {
        match self.try_fetch(query, limit).await {
            Ok(passages) => {
                debug!(source = %self.name(), count = passages.len(), limit, "Fetched candidates");
                passages
            }
            Err(e) => {
                warn!(
                    source = %self.name(),
                    error = %e,
                    "Candidate source failed, using fallback passages"
                );
                fallback_passages(query)
            }
        }
    }

    /// Fetch candidates, reporting failures instead of absorbing them.
    pub async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<Passage>, SourceError> {
        match tokio::time::timeout(self.timeout, self.inner.search(query, limit)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}
