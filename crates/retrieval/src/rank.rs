//! Ranking of scored candidates.

use std::cmp::Ordering;

use crate::provenance::ScoredPassage;

/// Order passages by provenance score, highest first.
///
/// Among equal scores the fresher passage (smaller `age_days`) comes first.
/// The sort is stable, so fully tied passages keep their source order.
pub fn rank(mut passages: Vec<ScoredPassage>) -> Vec<ScoredPassage> {
    passages.sort_by(compare);
    passages
}

/// Rank and keep only the first `max_passages`.
pub fn rank_top(passages: Vec<ScoredPassage>, max_passages: usize) -> Vec<ScoredPassage> {
    let mut ranked = rank(passages);
    ranked.truncate(max_passages);
    ranked
}

fn compare(a: &ScoredPassage, b: &ScoredPassage) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.age_days().cmp(&b.age_days()))
}
