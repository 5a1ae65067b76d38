//! `breathrag config` — Configuration management commands.

use std::path::{Path, PathBuf};

use breathrag_config::{AppConfig, SourceKind};

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if config.source.kind == SourceKind::None {
                warnings.push("Source kind is \"none\": every retrieval returns no passages");
            }

            if config.source.timeout_secs > 30 {
                warnings.push("Source timeout above 30s; retrievals may stall on a dead store");
            }

            if let Some(path) = &config.source.path {
                if config.source.kind == SourceKind::File && !path.exists() {
                    warnings.push("Source file does not exist; retrievals will use the fallback");
                }
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Source:     {:?}", config.source.kind);
            println!("   URL:        {}", config.source.url);
            println!("   Timeout:    {}s", config.source.timeout_secs);
            println!("   Overfetch:  ×{}", config.retrieval.overfetch_multiplier);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    print!("{}", render_effective(&config, &config_file())?);
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let file = config_file();
    println!("{}", file.display());
    if !file.exists() {
        eprintln!("(not found; built-in defaults are in use)");
    }
    Ok(())
}

fn config_file() -> PathBuf {
    AppConfig::config_dir().join("config.toml")
}

/// The effective config as TOML, headed by where it came from.
fn render_effective(config: &AppConfig, file: &Path) -> Result<String, toml::ser::Error> {
    let origin = if file.exists() {
        file.display().to_string()
    } else {
        "built-in defaults".to_string()
    };
    Ok(format!(
        "# Effective configuration from {origin}, BREATHRAG_* overrides applied\n{}",
        toml::to_string_pretty(config)?
    ))
}
