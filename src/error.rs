//! Error types and Result aliases for lissacon

use std::fmt;
use std::path::PathBuf;

/// Result type alias for lissacon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for lissacon
#[derive(Debug)]
pub enum Error {
    // === Parameter store errors ===
    /// Parameter name outside the fixed vocabulary
    UnknownParameter {
        name: String,
    },

    /// Preset name outside the fixed vocabulary
    UnknownPreset {
        name: String,
    },

    /// Value rejected by a parameter's validity rules
    InvalidValue {
        name: String,
        reason: String,
    },

    // === Plugin process errors ===
    /// Helper process could not be spawned
    PluginLaunchFailed {
        kind: String,
        reason: String,
    },

    /// Failed to materialize the plugin script to disk
    ScriptWriteFailed {
        reason: String,
    },

    // === REPL errors ===
    /// The wrapped interpreter reported a syntax or runtime fault
    Evaluator {
        message: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        reason: String,
    },

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownParameter { name } => {
                write!(f, "Unknown parameter '{}' (expected a, b, A, B, delta, points)", name)
            }
            Error::UnknownPreset { name } => {
                write!(
                    f,
                    "Unknown preset '{}' (expected circle, figure8, lissajous, star, bowtie)",
                    name
                )
            }
            Error::InvalidValue { name, reason } => {
                write!(f, "Invalid value for '{}': {}", name, reason)
            }
            Error::PluginLaunchFailed { kind, reason } => {
                write!(f, "Failed to launch '{}' plugin: {}", kind, reason)
            }
            Error::ScriptWriteFailed { reason } => {
                write!(f, "Failed to write plugin script: {}", reason)
            }
            Error::Evaluator { message } => {
                write!(f, "{}", message)
            }
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
