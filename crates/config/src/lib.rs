//! Configuration loading, validation, and management for breathrag.
//!
//! Loads configuration from `~/.breathrag/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.breathrag/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Candidate source configuration
    #[serde(default)]
    pub source: SourceConfig,

    /// Retrieval pipeline configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// Which candidate source backs retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// HTTP recall service
    #[default]
    Recall,
    /// JSON file of passages on disk
    File,
    /// No source; every retrieval sees an empty candidate pool
    None,
}

impl std::str::FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recall" => Ok(Self::Recall),
            "file" => Ok(Self::File),
            "none" => Ok(Self::None),
            other => Err(ConfigError::ValidationError(format!(
                "unknown source kind '{other}' (expected recall, file, or none)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Base URL of the recall service
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Path to a JSON passage file (kind = "file")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Upper bound on a single candidate fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_url() -> String {
    "http://localhost:8081".into()
}
fn default_timeout_secs() -> u64 {
    5
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            url: default_source_url(),
            path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Candidate pool size as a multiple of the passage budget
    #[serde(default = "default_overfetch_multiplier")]
    pub overfetch_multiplier: usize,
}

fn default_overfetch_multiplier() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            overfetch_multiplier: default_overfetch_multiplier(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.breathrag/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `BREATHRAG_SOURCE_KIND`
    /// - `BREATHRAG_SOURCE_URL`
    /// - `BREATHRAG_SOURCE_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup("BREATHRAG_SOURCE_KIND") {
            self.source.kind = kind.parse()?;
        }

        if let Some(url) = lookup("BREATHRAG_SOURCE_URL") {
            self.source.url = url;
        }

        if let Some(path) = lookup("BREATHRAG_SOURCE_PATH") {
            self.source.path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".breathrag")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "source.timeout_secs must be > 0".into(),
            ));
        }

        if self.retrieval.overfetch_multiplier == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.overfetch_multiplier must be >= 1".into(),
            ));
        }

        if self.source.kind == SourceKind::File && self.source.path.is_none() {
            return Err(ConfigError::ValidationError(
                "source.path is required when source.kind = \"file\"".into(),
            ));
        }

        if self.source.kind == SourceKind::Recall
            && !(self.source.url.starts_with("http://") || self.source.url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationError(format!(
                "source.url must be an http(s) URL, got '{}'",
                self.source.url
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
