use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionPhase;
use crate::sound::Sound;

/// Every state change of the session controller produces an Event.
/// The presentation layer renders them; nothing else consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        sound: Sound,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    Tick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The selected sound couldn't be played. The countdown keeps running.
    AudioUnavailable {
        sound: Sound,
        message: String,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero.
    SessionFinished {
        sound: Sound,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Session ended early by the user (or by a sound change).
    SessionStopped {
        sound: Sound,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SoundChanged {
        from: Sound,
        to: Sound,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: SessionPhase,
        selected_sound: Sound,
        duration_text: String,
        time_left_secs: Option<u64>,
        progress: f64,
        audio_playing: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether this event ends a session.
    pub fn is_session_end(&self) -> bool {
        matches!(
            self,
            Event::SessionFinished { .. } | Event::SessionStopped { .. }
        )
    }
}
