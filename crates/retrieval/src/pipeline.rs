//! The retrieval pipeline — one request/response cycle.
//!
//! # Flow
//!
//! 1. Resolve the budget profile from readiness `z`
//! 2. Over-fetch `max_passages × overfetch_multiplier` candidates
//! 3. Drop candidates below the provenance floor
//! 4. Rank and keep the top `max_passages`
//! 5. Pack into the token budget
//! 6. Summarize the selection

use std::sync::Arc;
use std::time::Duration;

use breathrag_core::passage::Passage;
use breathrag_core::retrieval::{BudgetProfile, PackedPassage, RetrievalResult, RetrievalStats};
use breathrag_core::source::CandidateSource;
use tracing::{debug, info};

use crate::budget::budgets_for;
use crate::fallback::ResilientSource;
use crate::pack::{pack, round_to};
use crate::provenance::ScoredPassage;
use crate::rank::rank_top;

/// Candidates scoring below this never reach the ranker.
pub const SCORE_FLOOR: f64 = 0.35;

/// Default candidate pool size as a multiple of the passage budget.
pub const DEFAULT_OVERFETCH_MULTIPLIER: usize = 3;

/// Passages corroborated by at least this many sources count as triangulated.
const TRIANGULATED_MIN: u64 = 2;

/// Runs retrievals against a candidate source.
///
/// Holds no per-call state; share it behind an `Arc` across tasks.
pub struct Retriever {
    source: ResilientSource,
    overfetch_multiplier: usize,
}

impl Retriever {
    /// Create a retriever with the default timeout and over-fetch multiplier.
    pub fn new(source: Arc<dyn CandidateSource>) -> Self {
        Self {
            source: ResilientSource::new(source),
            overfetch_multiplier: DEFAULT_OVERFETCH_MULTIPLIER,
        }
    }

    /// Set the timeout for candidate fetches.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.source = self.source.with_timeout(timeout);
        self
    }

    /// Set the default over-fetch multiplier (values below 1 are raised to 1).
    pub fn with_overfetch_multiplier(mut self, multiplier: usize) -> Self {
        self.overfetch_multiplier = multiplier.max(1);
        self
    }

    pub fn overfetch_multiplier(&self) -> usize {
        self.overfetch_multiplier
    }

    /// Retrieve with the configured over-fetch multiplier.
    pub async fn retrieve(&self, query: &str, z: f64) -> RetrievalResult {
        self.retrieve_with(query, z, self.overfetch_multiplier).await
    }

    /// Retrieve with an explicit over-fetch multiplier (raised to at least 1).
    ///
    /// Total: a failing or slow source is replaced by the fallback set, and
    /// every later step is infallible.
    pub async fn retrieve_with(
        &self,
        query: &str,
        z: f64,
        overfetch_multiplier: usize,
    ) -> RetrievalResult {
        let profile = budgets_for(z);
        let limit = profile.max_passages.saturating_mul(overfetch_multiplier.max(1));

        info!(
            source = %self.source.name(),
            timeout_ms = self.source.timeout().as_millis() as u64,
            z,
            max_passages = profile.max_passages,
            max_tokens = profile.max_context_tokens,
            limit,
            "Retrieval: fetching candidates"
        );

        let candidates = self.source.fetch(query, limit).await;
        let result = assemble(query, z, profile, candidates);

        info!(
            passages_used = result.passages_used,
            p_median = result.stats.p_median,
            "Retrieval: complete"
        );

        result
    }
}

/// Steps 3–6 of the pipeline over an already-fetched candidate pool.
///
/// Pure: identical inputs give identical output.
pub fn assemble(
    query: &str,
    z: f64,
    profile: BudgetProfile,
    candidates: Vec<Passage>,
) -> RetrievalResult {
    let fetched = candidates.len();
    let kept: Vec<ScoredPassage> = candidates
        .into_iter()
        .filter(|p| !p.text.is_empty())
        .map(ScoredPassage::new)
        .filter(|s| s.score >= SCORE_FLOOR)
        .collect();

    debug!(fetched, kept = kept.len(), floor = SCORE_FLOOR, "Retrieval: provenance filter");

    let ranked = rank_top(kept, profile.max_passages);
    let selected = pack(&ranked, profile.max_context_tokens);
    let stats = summarize(&ranked, &selected);

    RetrievalResult {
        query: query.to_string(),
        z_input: round_to(z, 3),
        passages_used: selected.len(),
        selected,
        stats,
        profile,
    }
}

/// Summary statistics over the ranked and packed sets.
pub fn summarize(ranked: &[ScoredPassage], packed: &[PackedPassage]) -> RetrievalStats {
    let mut scores: Vec<f64> = packed.iter().map(|p| p.score).collect();
    scores.sort_by(f64::total_cmp);
    let p_median = if scores.is_empty() {
        0.0
    } else {
        round_to(scores[(scores.len() - 1) / 2], 2)
    };

    let p95_age_days = ranked.iter().map(ScoredPassage::age_days).max();

    let triangulated = packed
        .iter()
        .filter(|p| p.triangulation_count >= TRIANGULATED_MIN)
        .count();
    let triangulated_pct = round_to(triangulated as f64 / packed.len().max(1) as f64, 2);

    RetrievalStats {
        p_median,
        p95_age_days,
        triangulated_pct,
    }
}
