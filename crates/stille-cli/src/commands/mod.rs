pub mod config;
pub mod session;
pub mod sounds;

use std::path::Path;

use stille_core::Config;

/// Load the config from `--config` or the default location.
pub fn load_config(path: Option<&Path>) -> stille_core::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
