//! TOML configuration for kairo.
//!
//! Settings live at the platform's XDG config path
//! (e.g. `~/.config/kairo/config.toml` on Linux). All fields use serde
//! defaults so kairo runs with sensible defaults when no config file
//! exists; [`Config::load`] creates one on first use.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::agent::LoopConfig;
use crate::constants::{APP_NAME, CONFIG_FILENAME, DEFAULT_MAX_ITERATIONS, DEFAULT_MODEL};

/// Root configuration, deserialized from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Optional system prompt prepended to all conversations.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Sampling temperature forwarded to the backend.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Maximum output tokens forwarded to the backend.
    #[serde(default)]
    pub max_tokens: Option<u64>,
    /// Maximum tool-calling round-trips after the first completion.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Execute tool calls of one batch concurrently.
    #[serde(default)]
    pub parallel_tools: bool,
}

/// Used by serde's `#[serde(default)]` attribute during deserialization.
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            system_prompt: None,
            temperature: None,
            max_tokens: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel_tools: false,
        }
    }
}

impl Config {
    /// Returns the platform-specific configuration directory for kairo.
    ///
    /// Returns `~/.config/kairo/` on Linux (`XDG_CONFIG_HOME/kairo`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the kairo configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads the config from `~/.config/kairo/config.toml`.
    ///
    /// If no config file exists, writes one with the defaults and
    /// returns it.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let config = Self::default();
            let default_toml =
                toml::to_string_pretty(&config).context("Failed to serialize default config")?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// The loop tunables this config selects.
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            max_iterations: self.max_iterations,
            parallel_tools: self.parallel_tools,
        }
    }
}
