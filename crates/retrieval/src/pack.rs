//! Token-budget packing.
//!
//! Uses a character-based heuristic: ~4 characters per token. This is a
//! deliberately coarse estimate, not a tokenizer; it only has to be
//! consistent between the packer and whoever reads the `tokens` field.

use breathrag_core::retrieval::PackedPassage;
use tracing::debug;

use crate::provenance::ScoredPassage;

/// Characters assumed per token.
const CHARS_PER_TOKEN: usize = 4;

/// Snippets are never cut shorter than this many characters.
pub const MIN_SNIPPET_CHARS: usize = 160;

/// Estimate the token count for a string (rounds down).
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Greedily fill `max_tokens` with ranked passages, in order.
///
/// Each passage is charged `min(estimate, remaining)`. Packing stops at the
/// first passage whose charge would be zero, either because the budget is
/// spent or because the passage is too short to register.
pub fn pack(ranked: &[ScoredPassage], max_tokens: usize) -> Vec<PackedPassage> {
    let mut budget = max_tokens;
    let mut packed = Vec::with_capacity(ranked.len());

    for scored in ranked {
        let cost = estimate_tokens(&scored.passage.text).min(budget);
        if cost == 0 {
            debug!(id = %scored.passage.id, remaining = budget, "Pack: budget exhausted");
            break;
        }

        packed.push(to_packed(scored, cost));
        budget -= cost;
    }

    packed
}

fn to_packed(scored: &ScoredPassage, cost: usize) -> PackedPassage {
    let meta = &scored.passage.metadata;
    PackedPassage {
        id: scored.passage.id.clone(),
        source: meta.source.clone(),
        date: meta.date.clone(),
        score: round_to(scored.score, 2),
        snippet: truncate_chars(&scored.passage.text, cost.max(MIN_SNIPPET_CHARS)),
        method: meta.method.clone(),
        triangulation_count: meta.triangulation_count_or_default(),
        authority: meta.authority_or_default(),
        risk: meta.risk_or_default().to_string(),
        tokens: cost,
    }
}

/// First `max_chars` characters of `text`, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
