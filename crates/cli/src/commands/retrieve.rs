//! `breathrag retrieve` — Run one retrieval and print the result.

use std::path::PathBuf;
use std::sync::Arc;

use breathrag_config::AppConfig;
use breathrag_retrieval::{FileSource, Retriever};
use tracing::debug;

pub async fn run(
    query: &str,
    z: f64,
    overfetch: Option<usize>,
    source_file: Option<PathBuf>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let retriever = match source_file {
        Some(path) => Retriever::with_source_config(Arc::new(FileSource::new(path)), &config),
        None => Retriever::from_config(&config)?,
    };

    debug!(query, z, ?overfetch, "Running retrieval");

    let result = match overfetch {
        Some(multiplier) => retriever.retrieve_with(query, z, multiplier).await,
        None => retriever.retrieve(query, z).await,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}
