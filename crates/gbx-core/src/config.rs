//! Configuration management for gbx.
//!
//! Loads configuration from ${GBX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for gbx configuration and data files.
    //!
    //! GBX_HOME resolution order:
    //! 1. GBX_HOME environment variable (if set)
    //! 2. ~/.config/gbx (default)

    use std::path::PathBuf;

    /// Returns the gbx home directory.
    ///
    /// Checks GBX_HOME env var first, falls back to ~/.config/gbx
    pub fn gbx_home() -> PathBuf {
        if let Ok(home) = std::env::var("GBX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("gbx"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        gbx_home().join("config.toml")
    }

    /// Returns the path to the stored session credential.
    pub fn credentials_path() -> PathBuf {
        gbx_home().join("credentials.json")
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backup server API.
    pub base_url: String,

    /// Timeout for API requests in seconds (0 disables)
    pub request_timeout_secs: u32,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the server base URL with precedence: env > config > default.
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended
    /// verbatim.
    ///
    /// # Errors
    /// Returns an error if the resolved URL is not well-formed.
    pub fn effective_base_url(&self) -> Result<String> {
        resolve_base_url(std::env::var("GBX_BASE_URL").ok().as_deref(), &self.base_url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Resolves a base URL with precedence: env value > config value > default.
fn resolve_base_url(env_value: Option<&str>, config_value: &str) -> Result<String> {
    let candidate = match env_value.map(str::trim) {
        Some(env_url) if !env_url.is_empty() => env_url,
        _ => {
            let trimmed = config_value.trim();
            if trimmed.is_empty() {
                Config::DEFAULT_BASE_URL
            } else {
                trimmed
            }
        }
    };

    validate_url(candidate)?;
    Ok(candidate.trim_end_matches('/').to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid server base URL: {url}"))?;
    Ok(())
}
