//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot file name used when nothing else is configured.
pub const DEFAULT_DATABASE: &str = "convex_local_backend.sqlite3";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite snapshot
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Sample rows shown per listing
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Players shown in the per-player breakdown
    #[serde(default = "default_top_players")]
    pub top_players: usize,

    /// Candidate rows read for messages in the full report
    #[serde(default = "default_message_limit")]
    pub message_limit: usize,

    /// Candidate rows read for player descriptions
    #[serde(default = "default_player_limit")]
    pub player_limit: usize,

    /// Directory export files are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_sample_size() -> usize {
    5
}

fn default_top_players() -> usize {
    10
}

fn default_message_limit() -> usize {
    100
}

fn default_player_limit() -> usize {
    50
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: default_true(),
            format: default_format(),
            sample_size: default_sample_size(),
            top_players: default_top_players(),
            message_limit: default_message_limit(),
            player_limit: default_player_limit(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docsift").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(config.settings.sample_size, 5);
        assert_eq!(config.settings.player_limit, 50);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database = \"town.sqlite3\"\n\n[settings]\nformat = \"json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database, PathBuf::from("town.sqlite3"));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.settings.top_players, 10);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }
}
