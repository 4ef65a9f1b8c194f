//! TOML-based application configuration.
//!
//! Holds the starting selection, audio settings and notification
//! preferences. Configuration is read from `~/.config/stille/config.toml`;
//! a missing file means defaults. Stille never writes this file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::sound::{Sound, SoundLibrary};

/// Starting selection for the screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_duration_min")]
    pub default_duration_min: u32,
    #[serde(default)]
    pub default_sound: Sound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Playback volume, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u32,
    /// Directory holding the sound assets. Defaults to `<data dir>/sounds`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Ring the terminal bell when a session finishes.
    #[serde(default = "default_true")]
    pub bell: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_duration_min() -> u32 {
    10
}
fn default_volume() -> u32 {
    100
}
fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_duration_min: default_duration_min(),
            default_sound: Sound::Silence,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            sounds_dir: None,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { bell: true }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, or return defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or return defaults if there is no file there.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.default_duration_min == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.default_duration_min".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.audio.volume > 100 {
            return Err(ConfigError::InvalidValue {
                key: "audio.volume".into(),
                message: format!("{} is above 100", self.audio.volume),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Where the sound assets are looked up.
    pub fn sounds_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.audio.sounds_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("sounds")),
        }
    }

    pub fn sound_library(&self) -> Result<SoundLibrary, ConfigError> {
        Ok(SoundLibrary::new(self.sounds_dir()?))
    }

    /// Volume as a 0.0 .. 1.0 gain.
    pub fn volume_gain(&self) -> f32 {
        self.audio.volume.min(100) as f32 / 100.0
    }

    /// Initial contents of the duration field.
    pub fn duration_text(&self) -> String {
        self.session.default_duration_min.to_string()
    }
}
