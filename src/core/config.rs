//! Application configuration management
//!
//! Handles loading and saving shell settings including:
//! - The ordered endpoint list used for load fallback
//! - The default status-bar inset used when sampling offline
//! - The scroll debounce window

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ShellError};
use crate::shell::endpoints::parse_endpoint;

/// Endpoints tried in order when nothing is configured
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "example1:88888",
    "https://www.example2.com",
    "http://example3.com",
];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Page endpoints, tried in order until one loads
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Status-bar height in pixels to skip when the host reports none
    #[serde(default)]
    pub status_bar_inset: u32,

    /// Quiet period after scrolling before the status bar is resampled
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,
}

fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()
}

fn default_scroll_debounce_ms() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            status_bar_inset: 0,
            scroll_debounce_ms: default_scroll_debounce_ms(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    ///
    /// Fails with `NoEndpoints` or `InvalidEndpoint` when the endpoint list
    /// is unusable.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the file without validating endpoints
    pub(crate) fn read_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            debug!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the configuration directory
    pub fn config_dir() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "tint-shell", "tint-shell")
            .ok_or_else(|| ShellError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Check that the endpoint list is non-empty and every entry parses
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(ShellError::NoEndpoints);
        }
        for endpoint in &self.endpoints {
            parse_endpoint(endpoint)?;
        }
        Ok(())
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    /// Append an endpoint after validating it
    ///
    /// Returns false if the endpoint was already present.
    pub fn add_endpoint(&mut self, endpoint: &str) -> Result<bool> {
        let endpoint = endpoint.trim();
        parse_endpoint(endpoint)?;

        if self.endpoints.iter().any(|e| e == endpoint) {
            return Ok(false);
        }
        self.endpoints.push(endpoint.to_string());
        Ok(true)
    }

    /// Remove an endpoint; returns whether it was present
    ///
    /// The last remaining endpoint cannot be removed.
    pub fn remove_endpoint(&mut self, endpoint: &str) -> Result<bool> {
        let endpoint = endpoint.trim();
        if !self.endpoints.iter().any(|e| e == endpoint) {
            return Ok(false);
        }
        if self.endpoints.len() == 1 {
            return Err(ShellError::NoEndpoints);
        }
        self.endpoints.retain(|e| e != endpoint);
        Ok(true)
    }

    /// Restore the built-in endpoint list
    pub fn reset_endpoints(&mut self) {
        self.endpoints = default_endpoints();
    }
}
