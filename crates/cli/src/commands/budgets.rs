//! `breathrag budgets` — Show readiness tiers.

use breathrag_core::retrieval::BudgetProfile;
use breathrag_retrieval::budget::{BASE_TIER, TIERS, budgets_for};

pub fn run(z: Option<f64>) -> Result<(), Box<dyn std::error::Error>> {
    match z {
        Some(z) => {
            let profile = budgets_for(z);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        None => {
            println!("📐 Readiness tiers");
            println!("=================");
            println!("  {:<8} {:>8} {:>8}  {:<16} {}", "z >=", "passages", "tokens", "audience", "tone");
            for (threshold, profile) in TIERS.iter() {
                print_row(&format!("{threshold:.2}"), profile);
            }
            print_row("else", &BASE_TIER);
        }
    }
    Ok(())
}

fn print_row(threshold: &str, profile: &BudgetProfile) {
    println!(
        "  {:<8} {:>8} {:>8}  {:<16} {}",
        threshold,
        profile.max_passages,
        profile.max_context_tokens,
        profile.audience_tier,
        profile.tone
    );
}
