//! Build candidate sources and retrievers from configuration.

use std::sync::Arc;
use std::time::Duration;

use breathrag_config::{AppConfig, SourceConfig, SourceKind};
use breathrag_core::error::Error;
use breathrag_core::source::CandidateSource;
use tracing::debug;

use crate::file_source::FileSource;
use crate::noop::NoopSource;
use crate::pipeline::Retriever;
use crate::recall::RecallSource;

/// Instantiate the candidate source named by `config.kind`.
pub fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn CandidateSource>, Error> {
    let source: Arc<dyn CandidateSource> = match config.kind {
        SourceKind::Recall => {
            let recall = RecallSource::with_timeout(
                config.url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            debug!(url = %recall.base_url(), "Using recall service");
            Arc::new(recall)
        }
        SourceKind::File => {
            let path = config.path.clone().ok_or_else(|| Error::Config {
                message: "source.path is required for the file source".into(),
            })?;
            let file = FileSource::new(path);
            debug!(path = %file.path().display(), "Using passage file");
            Arc::new(file)
        }
        SourceKind::None => Arc::new(NoopSource),
    };

    debug!(source = %source.name(), "Candidate source configured");
    Ok(source)
}

impl Retriever {
    /// Build a retriever from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let source = source_from_config(&config.source)?;
        Ok(Self::with_source_config(source, config))
    }

    /// Build a retriever over an explicit source, taking timeout and
    /// over-fetch settings from config.
    pub fn with_source_config(source: Arc<dyn CandidateSource>, config: &AppConfig) -> Self {
        Self::new(source)
            .with_timeout(Duration::from_secs(config.source.timeout_secs))
            .with_overfetch_multiplier(config.retrieval.overfetch_multiplier)
    }
}
