mod config;

pub use config::{AudioConfig, Config, NotificationsConfig, SessionConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/stille[-dev]/` based on STILLE_ENV.
///
/// Set STILLE_ENV=dev to use the development data directory. The directory
/// is not created: nothing in Stille writes to it.
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
        .join(".config");

    let env = std::env::var("STILLE_ENV").unwrap_or_else(|_| "production".to_string());

    Ok(if env == "dev" {
        base_dir.join("stille-dev")
    } else {
        base_dir.join("stille")
    })
}
