//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Default server URL
    pub server_url: String,

    /// Default output format
    pub output_format: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            output_format: "table".to_string(),
            timeout: 30,
        }
    }
}

impl CliConfig {
    /// Load configuration from the default file, or fall back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, or fall back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read CLI config file")?;
            toml::from_str(&content).context("Failed to parse CLI config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;
        std::fs::write(&config_path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config")
        } else {
            return Err(anyhow::anyhow!("Cannot determine config directory"));
        };

        Ok(config_dir.join("airsense").join("cli.toml"))
    }
}
