//! Configuration management for the Weed Guard CLI

use std::path::{Path, PathBuf};
use std::time::Duration;

use etcetera::{choose_base_strategy, BaseStrategy};
use serde::{Deserialize, Serialize};
use weedguard_common::ConfigurationError;
use weedguard_sdk::{ClientBuilder, WeedGuardClient};

/// CLI configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// API configuration
    pub api: ApiConfig,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the Weed Guard API
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    weedguard_sdk::DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: weedguard_common::api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CliConfig {
    /// Default config file path (`~/.config/weedguard/config.toml` on Linux)
    pub fn default_path() -> Result<PathBuf, ConfigurationError> {
        let strategy = choose_base_strategy()
            .map_err(|e| ConfigurationError::BaseDirs(e.to_string()))?;
        Ok(strategy
            .config_dir()
            .join(weedguard_common::STORAGE_DIR_NAME)
            .join("config.toml"))
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str(&contents).map_err(|e| ConfigurationError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Persist configuration, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigurationError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigurationError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, contents).map_err(|source| ConfigurationError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Build an SDK client from this configuration
    pub fn client(&self) -> crate::error::Result<WeedGuardClient> {
        Ok(ClientBuilder::new()
            .base_url(&self.api.base_url)
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .build()?)
    }
}
