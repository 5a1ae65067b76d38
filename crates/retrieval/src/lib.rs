//! Readiness-aware passage retrieval for breathrag.
//!
//! Scoring, ranking, and packing are pure functions; [`Retriever`] wires
//! them to a candidate source behind a timeout and fallback.

pub mod budget;
pub mod factory;
pub mod fallback;
pub mod file_source;
pub mod in_memory;
pub mod noop;
pub mod pack;
pub mod pipeline;
pub mod provenance;
pub mod rank;
pub mod recall;

pub use budget::budgets_for;
pub use factory::source_from_config;
pub use fallback::{ResilientSource, fallback_passages};
pub use file_source::FileSource;
pub use in_memory::InMemorySource;
pub use noop::NoopSource;
pub use pack::{estimate_tokens, pack};
pub use pipeline::{Retriever, SCORE_FLOOR, assemble};
pub use provenance::{ScoredPassage, provenance_score};
pub use rank::{rank, rank_top};
pub use recall::RecallSource;
