//! Readiness-driven budget tiers.
//!
//! A single readiness scalar `z` selects how many passages and tokens the
//! consumer gets, and how the context should be pitched. Tiers are checked
//! from the highest threshold down; the first match wins and anything below
//! the lowest threshold (including NaN) lands in the bottom tier.

use breathrag_core::retrieval::{AudienceTier, BudgetProfile, Tone};

/// Threshold-ordered tier table, highest first.
pub const TIERS: [(f64, BudgetProfile); 3] = [
    (
        0.90,
        BudgetProfile {
            max_passages: 8,
            max_context_tokens: 3200,
            audience_tier: AudienceTier::Expert,
            tone: Tone::Concise,
        },
    ),
    (
        0.80,
        BudgetProfile {
            max_passages: 6,
            max_context_tokens: 2400,
            audience_tier: AudienceTier::UpperSecondary,
            tone: Tone::Plain,
        },
    ),
    (
        0.70,
        BudgetProfile {
            max_passages: 4,
            max_context_tokens: 1600,
            audience_tier: AudienceTier::Secondary,
            tone: Tone::VeryPlain,
        },
    ),
];

/// Profile for readiness below every threshold.
pub const BASE_TIER: BudgetProfile = BudgetProfile {
    max_passages: 2,
    max_context_tokens: 900,
    audience_tier: AudienceTier::Middle,
    tone: Tone::Bullets,
};

/// Resolve the budget profile for a readiness value.
pub fn budgets_for(z: f64) -> BudgetProfile {
    TIERS
        .iter()
        .find(|(threshold, _)| z >= *threshold)
        .map(|(_, profile)| *profile)
        .unwrap_or(BASE_TIER)
}
