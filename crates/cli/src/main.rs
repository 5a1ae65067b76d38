//! breathrag CLI — the main entry point.
//!
//! Commands:
//! - `retrieve` — Run the retrieval pipeline and print the result as JSON
//! - `budgets`  — Show the readiness tier table
//! - `score`    — Score a metadata object
//! - `config`   — Show, locate, or validate configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "breathrag",
    about = "breathrag — readiness-aware passage retrieval",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve passages for a query at a readiness level
    Retrieve {
        /// The search query
        query: String,

        /// Readiness of the consumer (higher gets more context)
        #[arg(short, long, allow_negative_numbers = true)]
        z: f64,

        /// Override the configured over-fetch multiplier
        #[arg(long)]
        overfetch: Option<usize>,

        /// Read passages from this JSON file instead of the configured source
        #[arg(long, env = "BREATHRAG_SOURCE_FILE")]
        source_file: Option<std::path::PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the budget tier table, or the tier for one readiness value
    Budgets {
        #[arg(short, long, allow_negative_numbers = true)]
        z: Option<f64>,
    },

    /// Print the provenance score of a metadata JSON object
    Score {
        /// Metadata as JSON, e.g. '{"age_days": 3, "method": "ocr"}'
        metadata: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Validate the configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean on stdout
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Retrieve {
            query,
            z,
            overfetch,
            source_file,
            pretty,
        } => commands::retrieve::run(&query, z, overfetch, source_file, pretty).await?,
        Commands::Budgets { z } => commands::budgets::run(z)?,
        Commands::Score { metadata } => commands::score::run(&metadata)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
            ConfigAction::Validate => commands::config_cmd::validate()?,
        },
    }

    Ok(())
}
