//! In-memory candidate source — useful for testing and embedding a fixed corpus.

use async_trait::async_trait;
use breathrag_core::error::SourceError;
use breathrag_core::passage::Passage;
use breathrag_core::source::{CandidateSource, assign_positional_ids};

/// A candidate source over a fixed list of passages.
///
/// Matches passages containing any whitespace-separated query term
/// (case-insensitive) and returns them in insertion order.
pub struct InMemorySource {
    passages: Vec<Passage>,
}

impl InMemorySource {
    pub fn new(mut passages: Vec<Passage>) -> Self {
        assign_positional_ids(&mut passages);
        Self { passages }
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[async_trait]
impl CandidateSource for InMemorySource {
    fn name(&self) -> &str { "in_memory" }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>, SourceError> {
        Ok(keyword_filter(&self.passages, query, limit))
    }
}

/// Passages whose text contains any query term, in order, capped at `limit`.
///
/// A blank query matches everything.
pub(crate) fn keyword_filter(passages: &[Passage], query: &str, limit: usize) -> Vec<Passage> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    passages
        .iter()
        .filter(|p| {
            if terms.is_empty() {
                return true;
            }
            let text = p.text.to_lowercase();
            terms.iter().any(|t| text.contains(t.as_str()))
        })
        .take(limit)
        .cloned()
        .collect()
}
