//! Retrieval outputs — budget profiles, packed passages, and results.

use serde::{Deserialize, Serialize};

/// How much context a consumer at a given readiness level receives, and how
/// it should be written for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProfile {
    /// Maximum number of passages kept after ranking
    pub max_passages: usize,

    /// Token budget for the packed context
    pub max_context_tokens: usize,

    /// Reading level the context is written for
    pub audience_tier: AudienceTier,

    /// Writing tone for the consumer
    pub tone: Tone,
}

/// Reading level, from most to least capable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudienceTier {
    Expert,
    UpperSecondary,
    Secondary,
    Middle,
}

impl AudienceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::UpperSecondary => "upper-secondary",
            Self::Secondary => "secondary",
            Self::Middle => "middle",
        }
    }
}

impl std::fmt::Display for AudienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Writing tone, from densest to most broken-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Concise,
    Plain,
    VeryPlain,
    Bullets,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Plain => "plain",
            Self::VeryPlain => "very-plain",
            Self::Bullets => "bullets",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A passage trimmed and annotated for inclusion in a context window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedPassage {
    pub id: String,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    /// Provenance score, rounded to two decimals
    pub score: f64,

    /// Leading slice of the passage text
    pub snippet: String,

    #[serde(default)]
    pub method: Option<String>,

    pub triangulation_count: u64,

    pub authority: f64,

    pub risk: String,

    /// Estimated token cost charged against the budget
    pub tokens: usize,
}

/// Summary statistics over a retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalStats {
    /// Median score of the packed passages (lower middle for even counts)
    pub p_median: f64,

    /// Largest `age_days` among the ranked passages. Despite the name this is
    /// the maximum, not an interpolated percentile.
    pub p95_age_days: Option<u64>,

    /// Fraction of packed passages corroborated by at least two sources
    pub triangulated_pct: f64,
}

/// The full output of one retrieval call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub query: String,

    /// Readiness input, rounded to three decimals
    pub z_input: f64,

    pub passages_used: usize,

    pub selected: Vec<PackedPassage>,

    pub stats: RetrievalStats,

    /// The budget profile resolved from `z_input`
    pub profile: BudgetProfile,
}
