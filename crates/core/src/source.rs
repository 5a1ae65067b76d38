//! Candidate source trait — the external store that supplies passages.
//!
//! The pipeline treats the store as an opaque search API. Implementations
//! report failures honestly through [`SourceError`]; absorbing them is the
//! job of the resilient adapter in the retrieval crate, not of each source.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::passage::Passage;

/// A searchable store of candidate passages.
///
/// Implementations: HTTP recall service, JSON file, in-memory (for testing),
/// none (no-op).
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// The source name (e.g., "recall", "file", "none").
    fn name(&self) -> &str;

    /// Return up to `limit` candidate passages for `query`.
    ///
    /// Order is not significant. Records without an id must be given a
    /// positional one, stable for the duration of the call.
    async fn search(&self, query: &str, limit: usize)
    -> std::result::Result<Vec<Passage>, SourceError>;
}

/// Assign positional ids (`passage_{i}`) to passages that arrived without one.
///
/// A positional id already used by another passage gets a `_{n}` suffix, so
/// ids stay unique within the slice.
pub fn assign_positional_ids(passages: &mut [Passage]) {
    let mut taken: HashSet<String> = passages
        .iter()
        .filter(|p| !p.id.is_empty())
        .map(|p| p.id.clone())
        .collect();

    for (i, passage) in passages.iter_mut().enumerate() {
        if !passage.id.is_empty() {
            continue;
        }
        let mut id = format!("passage_{i}");
        let mut n = 1;
        while taken.contains(&id) {
            id = format!("passage_{i}_{n}");
            n += 1;
        }
        taken.insert(id.clone());
        passage.id = id;
    }
}
