//! Configuration handling for inijson
//!
//! Configuration is stored in `~/.config/inijson/config.toml` by default.
//! `--config <path>` or `INIJSON_CONFIG` points somewhere else.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Which parse policy commands use when no flag is given
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Coerce booleans and numbers
    #[default]
    Typed,
    /// Keep every value as a string, group leading keys under `default`
    Text,
}

impl ParseMode {
    pub fn as_str(&self) -> &str {
        match self {
            ParseMode::Typed => "typed",
            ParseMode::Text => "text",
        }
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParseConfig {
    /// Default parse policy
    pub mode: ParseMode,
}

/// JSON rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Pretty-print JSON documents
    pub pretty: bool,

    /// Indentation width when pretty-printing
    pub indent: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Parse settings
    pub parse: ParseConfig,

    /// JSON settings
    pub json: JsonConfig,
}

impl GlobalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.json.indent > 16 {
            return Err(ConfigError::Invalid(format!(
                "json.indent must be at most 16, got {}",
                self.json.indent
            )));
        }
        Ok(())
    }
}

/// Effective configuration and where it was loaded from
#[derive(Debug, Clone)]
pub struct Config {
    pub global: GlobalConfig,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };

        let global = match &path {
            Some(p) if p.exists() => Self::load_file(p)?,
            _ => GlobalConfig::default(),
        };

        Ok(Self { global, path })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "inijson", "inijson").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GlobalConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: GlobalConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        Ok(config)
    }

    /// Saves the configuration to its path
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Renders the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.global).context("Failed to serialize config")
    }
}
