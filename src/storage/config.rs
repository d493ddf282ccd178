//! Configuration handling for the catalog CLI
//!
//! Configuration is read from `~/.config/catalog/catalog.toml` (global) and
//! `./catalog.toml` (project). Project values override global ones; command
//! line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::snapshot::{LoadPolicy, DEFAULT_DATA_FILE};

/// Name of the configuration file in both locations
pub const CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One configuration file; unset keys fall through to the next layer
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Path of the working data file
    pub data_file: Option<PathBuf>,

    /// Fail on malformed data files instead of starting empty
    pub strict_load: Option<bool>,

    /// Default output format (text or json)
    pub default_format: Option<OutputFormat>,
}

impl ConfigFile {
    /// Parses TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if file
            .data_file
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("data_file must not be empty".to_string()));
        }

        Ok(file)
    }

    /// Reads a config file, returning defaults if it does not exist
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Layers `other` on top of `self`
    fn overlay(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            data_file: other.data_file.or(self.data_file),
            strict_load: other.strict_load.or(self.strict_load),
            default_format: other.default_format.or(self.default_format),
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_file: PathBuf,
    pub load_policy: LoadPolicy,
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            load_policy: LoadPolicy::Lenient,
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration from the global and current-directory files
    pub fn load() -> Result<Self> {
        let global = match Self::global_config_path() {
            Some(path) => ConfigFile::read(&path)?,
            None => ConfigFile::default(),
        };

        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let project = ConfigFile::read(&cwd.join(CONFIG_FILE))?;

        Ok(Self::from_layers(global, project))
    }

    /// Loads configuration from a specific project directory
    pub fn for_dir(dir: &Path) -> Result<Self> {
        let project = ConfigFile::read(&dir.join(CONFIG_FILE))?;
        Ok(Self::from_layers(ConfigFile::default(), project))
    }

    /// Combines global and project layers over built-in defaults
    pub fn from_layers(global: ConfigFile, project: ConfigFile) -> Self {
        let merged = global.overlay(project);
        let defaults = Self::default();

        Self {
            data_file: merged.data_file.unwrap_or(defaults.data_file),
            load_policy: match merged.strict_load {
                Some(true) => LoadPolicy::Strict,
                _ => LoadPolicy::Lenient,
            },
            default_format: merged.default_format.unwrap_or(defaults.default_format),
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "catalog", "catalog-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}
