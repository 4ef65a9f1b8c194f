//! Core error types for stille-core.
//!
//! User-facing session errors, audio player errors and configuration
//! errors, plus a [`CoreError`] umbrella for callers that don't care which.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stille-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session control errors
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Audio playback errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reported to the user when they operate the session controls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Duration text is not a positive whole number of minutes
    #[error("Please enter a valid duration in minutes (got '{input}')")]
    InvalidDuration { input: String },

    /// Name doesn't match any entry of the sound catalog
    #[error("Unknown sound '{name}' (expected one of: {expected})")]
    UnknownSound { name: String, expected: String },
}

/// Failure reported by an [`AudioPlayer`](crate::audio::AudioPlayer).
///
/// On load this degrades the session to silence; on stop/unload it is
/// logged and otherwise ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", asset_suffix(.asset))]
pub struct AudioError {
    pub asset: Option<PathBuf>,
    pub message: String,
}

impl AudioError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            asset: None,
            message: message.into(),
        }
    }

    pub fn for_asset(asset: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
            message: message.into(),
        }
    }
}

fn asset_suffix(asset: &Option<PathBuf>) -> String {
    asset
        .as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
