//! Error types for the breathrag domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Candidate-source
//! failures have their own enum because the pipeline absorbs them; the
//! top-level [`Error`] is only seen at the config and CLI boundary.

use thiserror::Error;

/// The top-level error type for breathrag operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Candidate source errors ---
    #[error("Candidate source error: {0}")]
    Source(#[from] SourceError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Failures of a [`CandidateSource`](crate::source::CandidateSource).
///
/// None of these reach the caller of a retrieval: the resilient adapter
/// substitutes the fallback passage set instead.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Candidate source unavailable: {0}")]
    Unavailable(String),

    #[error("Candidate source timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Candidate source returned status {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("Malformed candidate response: {0}")]
    Malformed(String),
}
