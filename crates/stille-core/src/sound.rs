//! Ambient sound catalog.
//!
//! The set of sounds is closed: the picker offers exactly these entries, and
//! [`Sound::Silence`] is the one without an asset.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sound {
    #[default]
    Silence,
    AlphaWaves,
    DeepSpace,
    Forest,
}

impl Sound {
    /// Picker order.
    pub const ALL: [Sound; 4] = [
        Sound::Silence,
        Sound::AlphaWaves,
        Sound::DeepSpace,
        Sound::Forest,
    ];

    /// Stable identifier used in config files, CLI arguments and JSON.
    pub fn name(self) -> &'static str {
        match self {
            Sound::Silence => "silence",
            Sound::AlphaWaves => "alpha-waves",
            Sound::DeepSpace => "deep-space",
            Sound::Forest => "forest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sound::Silence => "Silence",
            Sound::AlphaWaves => "Alpha Waves",
            Sound::DeepSpace => "Deep Space",
            Sound::Forest => "Forest",
        }
    }

    /// File name of the looping asset, `None` for silence.
    pub fn asset_file(self) -> Option<&'static str> {
        match self {
            Sound::Silence => None,
            Sound::AlphaWaves => Some("alphawellen.mp3"),
            Sound::DeepSpace => Some("deepspace.mp3"),
            Sound::Forest => Some("forest.mp3"),
        }
    }

    pub fn is_silence(self) -> bool {
        self == Sound::Silence
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sound {
    type Err = SessionError;

    /// Accepts the identifier or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Sound::ALL
            .into_iter()
            .find(|sound| {
                sound.name().eq_ignore_ascii_case(wanted)
                    || sound.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SessionError::UnknownSound {
                name: wanted.to_string(),
                expected: Sound::ALL.map(Sound::name).join(", "),
            })
    }
}

/// Maps catalog entries to asset files under a sounds directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundLibrary {
    dir: PathBuf,
}

impl SoundLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Asset path for `sound`. Silence never resolves.
    pub fn resolve(&self, sound: Sound) -> Option<PathBuf> {
        sound.asset_file().map(|file| self.dir.join(file))
    }

    /// Whether the asset for `sound` is present on disk. Silence is always
    /// available.
    pub fn is_available(&self, sound: Sound) -> bool {
        self.resolve(sound).map_or(true, |path| path.is_file())
    }
}
