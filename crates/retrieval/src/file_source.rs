//! File-based candidate source — passages stored as JSON on disk.
//!
//! Accepts either a JSON array of passages or JSON-lines (one passage per
//! line). The file is re-read on every search so edits show up without a
//! restart. Corrupted records are skipped; an unreadable file, or one with
//! no usable record, is a source failure and triggers the fallback set
//! upstream.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use breathrag_core::error::SourceError;
use breathrag_core::passage::Passage;
use breathrag_core::source::{CandidateSource, assign_positional_ids};
use serde_json::Value;
use tracing::{debug, warn};

use crate::in_memory::keyword_filter;

/// A candidate source backed by a JSON or JSONL file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Passage>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::Unavailable(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let mut passages = parse_passages(&content)?;
        assign_positional_ids(&mut passages);
        debug!(path = %self.path.display(), count = passages.len(), "Loaded passage file");
        Ok(passages)
    }
}

/// Parse a JSON array, or fall back to JSON-lines.
///
/// Records that are not JSON objects are skipped in either format. Input that
/// is not blank but yields no record at all is malformed.
fn parse_passages(content: &str) -> Result<Vec<Passage>, SourceError> {
    let (records, skipped) = if content.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(content)
            .map_err(|e| SourceError::Malformed(format!("invalid passage array: {e}")))?;
        let total = values.len();
        let records: Vec<Passage> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match value {
                Value::Object(map) => Some(Passage::from(map)),
                other => {
                    warn!(index, value = %other, "Skipping non-object passage record");
                    None
                }
            })
            .collect();
        let skipped = total - records.len();
        (records, skipped)
    } else {
        let mut skipped = 0;
        let records: Vec<Passage> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<Passage>(line) {
                Ok(passage) => Some(passage),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted passage line");
                    skipped += 1;
                    None
                }
            })
            .collect();
        (records, skipped)
    };

    if records.is_empty() && skipped > 0 {
        return Err(SourceError::Malformed(format!(
            "no usable passage records ({skipped} skipped)"
        )));
    }
    Ok(records)
}

#[async_trait]
impl CandidateSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>, SourceError> {
        let passages = self.load().await?;
        Ok(keyword_filter(&passages, query, limit))
    }
}
