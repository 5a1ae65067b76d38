//! # breathrag Core
//!
//! Domain types, traits, and error definitions for the breathrag retrieval
//! pipeline. This crate does no I/O; it defines the model that the
//! retrieval crate and the CLI build on.
//!
//! ## Design Philosophy
//!
//! The candidate store is the only collaborator, so it is the only trait.
//! Everything else is plain data:
//! - [`Passage`] / [`PassageMetadata`] go in
//! - [`RetrievalResult`] comes out
//! - [`BudgetProfile`] connects the two

pub mod error;
pub mod passage;
pub mod retrieval;
pub mod source;

// Re-export key types at crate root for ergonomics
pub use error::{Error, SourceError};
pub use passage::{Passage, PassageMetadata};
pub use retrieval::{
    AudienceTier, BudgetProfile, PackedPassage, RetrievalResult, RetrievalStats, Tone,
};
pub use source::CandidateSource;
