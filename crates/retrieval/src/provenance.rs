//! Provenance scoring — how much a passage can be trusted.
//!
//! A weighted linear blend of five normalized signals:
//! - Triangulation: corroborating sources, capped at 3 (weight 0.35)
//! - Freshness: linear decay to zero at one year old (weight 0.25)
//! - Authority: curated trust score (weight 0.20)
//! - Method: capture reliability, manual > ocr > asr (weight 0.10)
//! - Non-speculative bonus (weight 0.10)

use breathrag_core::passage::{Passage, PassageMetadata};

const TRIANGULATION_WEIGHT: f64 = 0.35;
const FRESHNESS_WEIGHT: f64 = 0.25;
const AUTHORITY_WEIGHT: f64 = 0.20;
const METHOD_WEIGHT: f64 = 0.10;
const GROUNDED_WEIGHT: f64 = 0.10;

/// Corroboration credit stops growing past this many sources.
const TRIANGULATION_CAP: u64 = 3;

/// Freshness reaches zero at this age.
const FRESHNESS_HORIZON_DAYS: f64 = 365.0;

/// Reliability weight of a capture method label.
///
/// Unrecognized or missing methods get the mid-quality weight.
pub fn method_weight(method: Option<&str>) -> f64 {
    match method {
        Some("manual") => 1.0,
        Some("ocr") => 0.6,
        Some("asr") => 0.5,
        _ => 0.5,
    }
}

/// Compute the provenance score of a passage's metadata, in [0, 1].
///
/// Pure and total: missing or malformed fields were already defaulted when
/// the metadata was parsed.
pub fn provenance_score(meta: &PassageMetadata) -> f64 {
    let triangulation = meta.triangulation_count_or_default().min(TRIANGULATION_CAP) as f64
        / TRIANGULATION_CAP as f64;
    let freshness = (1.0 - meta.age_days_or_default() as f64 / FRESHNESS_HORIZON_DAYS).max(0.0);
    let authority = meta.authority_or_default();
    let method = method_weight(meta.method.as_deref());
    let grounded = if meta.is_speculative() { 0.0 } else { 1.0 };

    let score = TRIANGULATION_WEIGHT * triangulation
        + FRESHNESS_WEIGHT * freshness
        + AUTHORITY_WEIGHT * authority
        + METHOD_WEIGHT * method
        + GROUNDED_WEIGHT * grounded;

    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// A passage paired with its provenance score, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    pub passage: Passage,
    pub score: f64,
}

impl ScoredPassage {
    pub fn new(passage: Passage) -> Self {
        let score = provenance_score(&passage.metadata);
        Self { passage, score }
    }

    pub fn age_days(&self) -> u64 {
        self.passage.metadata.age_days_or_default()
    }
}
