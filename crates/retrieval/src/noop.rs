//! No-op candidate source — retrieval always sees an empty pool.

use async_trait::async_trait;
use breathrag_core::error::SourceError;
use breathrag_core::passage::Passage;
use breathrag_core::source::CandidateSource;

/// A candidate source that never returns anything.
pub struct NoopSource;

#[async_trait]
impl CandidateSource for NoopSource {
    fn name(&self) -> &str { "none" }

    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Passage>, SourceError> {
        Ok(Vec::new())
    }
}
