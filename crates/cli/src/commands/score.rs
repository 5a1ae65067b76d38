//! `breathrag score` — Score provenance metadata.

use breathrag_core::passage::PassageMetadata;
use breathrag_retrieval::SCORE_FLOOR;
use breathrag_retrieval::provenance_score;

pub fn run(metadata: &str) -> Result<(), Box<dyn std::error::Error>> {
    let meta: PassageMetadata = serde_json::from_str(metadata)
        .map_err(|e| format!("Metadata must be a JSON object: {e}"))?;

    let score = provenance_score(&meta);
    let verdict = if score >= SCORE_FLOOR { "kept" } else { "filtered" };
    println!("{score:.4} ({verdict}, floor {SCORE_FLOOR})");

    Ok(())
}
