//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments, which take precedence in `main`

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sol006_schemas::ValidationMode;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputSection,

    /// Logging settings
    pub logging: LoggingSection,

    /// Validation settings
    pub validation: ValidationSection,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Default output format (human, json, yaml, json-pretty)
    pub format: String,

    /// Enable colored output
    pub color: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level used when no -v flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    /// Mode used when a command gets no --mode
    pub mode: ValidationMode,
}

/// File format of a configuration file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the first configuration file found in the default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration with an explicit file override
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".sol006.yaml"),
            PathBuf::from(".sol006.json"),
            PathBuf::from(".sol006.toml"),
        ];

        if let Some(dir) = Self::user_config_dir() {
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
            paths.push(dir.join("config.toml"));
        }

        paths
    }

    /// Directory holding the per-user configuration
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sol006"))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Save configuration to a file, format chosen by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Toml => self.to_toml()?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
