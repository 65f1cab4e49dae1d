//! Configuration management for lissacon
//!
//! TOML-based configuration with sensible defaults: REPL prompts and
//! history bounds, and interpreter candidate paths for the plugin
//! launchers.

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::ConfigLoader;

/// Main configuration structure for lissacon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REPL configuration
    pub repl: ReplConfig,

    /// Plugin launcher configuration
    pub plugins: PluginsConfig,
}

/// REPL-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt shown when not awaiting continuation
    pub primary_prompt: String,

    /// Prompt shown while a multi-line construct is open
    pub continuation_prompt: String,

    /// Maximum number of history entries to keep
    pub history_limit: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            primary_prompt: ">>> ".to_string(),
            continuation_prompt: "... ".to_string(),
            history_limit: 10000,
        }
    }
}

/// Plugin launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Candidate paths probed for a Tcl shell, most specific first
    pub tclsh_candidates: Vec<String>,

    /// Candidate paths probed for a Python interpreter
    pub python_candidates: Vec<String>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            tclsh_candidates: vec![
                "/opt/homebrew/opt/tcl-tk/bin/tclsh9.0".to_string(),
                "/opt/homebrew/opt/tcl-tk/bin/tclsh".to_string(),
                "/opt/homebrew/bin/tclsh".to_string(),
                "/usr/local/bin/tclsh".to_string(),
                "/usr/bin/tclsh".to_string(),
            ],
            python_candidates: vec![
                "/opt/homebrew/bin/python3".to_string(),
                "/usr/local/bin/python3".to_string(),
                "/usr/bin/python3".to_string(),
            ],
        }
    }
}
