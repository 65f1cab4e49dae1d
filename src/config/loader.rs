//! Configuration File Loading
//!
//! Finds and loads the TOML configuration from the usual locations with
//! fallback to built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::Config;
use crate::error::{Error, Result};

/// Environment variable overriding the config path
const CONFIG_ENV_VAR: &str = "LISSACON_CONFIG";

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files, highest priority first
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
        }
    }

    /// Load configuration: the first readable file in the search order
    /// wins; if none exists, built-in defaults are used.
    pub fn load() -> Result<Config> {
        Self::new().load_config()
    }

    /// Load configuration from an explicit path; the file must exist.
    pub fn load_from(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = toml::from_str(&text).map_err(|e| Error::ConfigParseFailed {
            reason: e.to_string(),
        })?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    fn load_config(&self) -> Result<Config> {
        for path in &self.search_paths {
            if path.is_file() {
                return Self::load_from(path);
            }
            debug!(path = %path.display(), "no config file here");
        }
        debug!("no configuration file found, using defaults");
        Ok(Config::default())
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(env_path));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("lissacon").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".lissacon").join("config.toml"));
        }
        paths.push(PathBuf::from("lissacon.toml"));

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
