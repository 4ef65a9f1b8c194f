//! Session controller.
//!
//! Owns the selection (sound + duration text), the two-state session
//! machine and the single audio handle. Like the countdown it wraps, it has
//! no timer of its own: the caller invokes `tick()` once per second while a
//! session is active.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start_session--> Active --(manual_stop | expiry | change_sound)--> Idle
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::audio::AudioPlayer;
use crate::error::SessionError;
use crate::events::Event;
use crate::sound::{Sound, SoundLibrary};
use crate::timer::{Countdown, CountdownTick};

pub const DEFAULT_DURATION_TEXT: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Active,
}

/// A running session. Only exists inside [`SessionState::Active`], so the
/// countdown and the audio handle can't outlive it.
#[derive(Debug)]
pub struct ActiveSession<H> {
    pub sound: Sound,
    pub countdown: Countdown,
    /// `None` for silence, or when the sound failed to load.
    pub audio: Option<H>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum SessionState<H> {
    Idle,
    Active(ActiveSession<H>),
}

impl<H> SessionState<H> {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Active(_) => SessionPhase::Active,
        }
    }
}

/// Parse the duration field into whole minutes.
///
/// Surrounding whitespace is ignored. Anything that isn't a positive
/// base-10 integer is rejected.
pub fn parse_duration(text: &str) -> Result<u32, SessionError> {
    let invalid = || SessionError::InvalidDuration {
        input: text.to_string(),
    };
    let minutes: i64 = text.trim().parse().map_err(|_| invalid())?;
    if minutes <= 0 {
        return Err(invalid());
    }
    u32::try_from(minutes).map_err(|_| invalid())
}

pub struct SessionController<P: AudioPlayer> {
    player: P,
    library: SoundLibrary,
    selected_sound: Sound,
    duration_text: String,
    state: SessionState<P::Handle>,
}

impl<P: AudioPlayer> SessionController<P> {
    /// Controller with the stock selection: silence, ten minutes.
    pub fn new(player: P, library: SoundLibrary) -> Self {
        Self {
            player,
            library,
            selected_sound: Sound::default(),
            duration_text: DEFAULT_DURATION_TEXT.to_string(),
            state: SessionState::Idle,
        }
    }

    pub fn with_selection(mut self, sound: Sound, duration_text: impl Into<String>) -> Self {
        self.selected_sound = sound;
        self.duration_text = duration_text.into();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState<P::Handle> {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// The full-screen countdown is shown exactly while a session runs.
    pub fn modal_visible(&self) -> bool {
        self.is_playing()
    }

    pub fn time_left(&self) -> Option<u64> {
        match &self.state {
            SessionState::Active(active) => Some(active.countdown.remaining_secs()),
            SessionState::Idle => None,
        }
    }

    pub fn has_audio(&self) -> bool {
        matches!(&self.state, SessionState::Active(active) if active.audio.is_some())
    }

    pub fn selected_sound(&self) -> Sound {
        self.selected_sound
    }

    pub fn duration_text(&self) -> &str {
        &self.duration_text
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn snapshot(&self) -> Event {
        let progress = match &self.state {
            SessionState::Active(active) => active.countdown.progress(),
            SessionState::Idle => 0.0,
        };
        Event::StateSnapshot {
            phase: self.phase(),
            selected_sound: self.selected_sound,
            duration_text: self.duration_text.clone(),
            time_left_secs: self.time_left(),
            progress,
            audio_playing: self.has_audio(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a session from the current selection.
    ///
    /// Returns `SessionStarted`, followed by `AudioUnavailable` if the
    /// sound failed to load. Does nothing while a session is active.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidDuration`] if the duration text isn't
    /// a positive whole number; the controller stays idle.
    pub async fn start_session(&mut self) -> Result<Vec<Event>, SessionError> {
        if self.is_playing() {
            debug!("start ignored, session already active");
            return Ok(Vec::new());
        }

        let minutes = parse_duration(&self.duration_text)?;
        let sound = self.selected_sound;
        let countdown = Countdown::from_minutes(minutes);
        let duration_secs = countdown.total_secs();

        let mut events = vec![Event::SessionStarted {
            sound,
            duration_secs,
            at: Utc::now(),
        }];

        let audio = match self.library.resolve(sound) {
            Some(asset) => match self.player.load(&asset).await {
                Ok(handle) => Some(handle),
                Err(err) => {
                    warn!(%sound, error = %err, "ambient sound unavailable, continuing in silence");
                    events.push(Event::AudioUnavailable {
                        sound,
                        message: err.to_string(),
                        at: Utc::now(),
                    });
                    None
                }
            },
            None => None,
        };

        info!(%sound, duration_secs, audio = audio.is_some(), "session started");
        self.state = SessionState::Active(ActiveSession {
            sound,
            countdown,
            audio,
            started_at: Utc::now(),
        });
        Ok(events)
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Tick`, or `SessionFinished` when the countdown reaches zero.
    /// Returns `None` while idle.
    pub async fn tick(&mut self) -> Option<Event> {
        let SessionState::Active(active) = &mut self.state else {
            return None;
        };
        match active.countdown.tick() {
            CountdownTick::Running { remaining_secs } => Some(Event::Tick {
                remaining_secs,
                at: Utc::now(),
            }),
            CountdownTick::Expired => self.end_session(true).await,
        }
    }

    /// End the active session and release its audio.
    ///
    /// Teardown failures are logged and otherwise ignored; the controller
    /// is idle afterwards either way. Returns `None` if already idle.
    pub async fn end_session(&mut self, expired: bool) -> Option<Event> {
        let SessionState::Active(active) = std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            return None;
        };
        let ActiveSession {
            sound,
            countdown,
            audio,
            started_at,
        } = active;

        if let Some(handle) = audio {
            self.release(handle).await;
        }

        let at = Utc::now();
        let elapsed_secs = (at - started_at).num_seconds();
        info!(%sound, expired, elapsed_secs, "session ended");

        Some(if expired {
            Event::SessionFinished {
                sound,
                duration_secs: countdown.total_secs(),
                at,
            }
        } else {
            Event::SessionStopped {
                sound,
                remaining_secs: countdown.remaining_secs(),
                at,
            }
        })
    }

    pub async fn manual_stop(&mut self) -> Option<Event> {
        self.end_session(false).await
    }

    /// Select another sound. An active session is stopped first.
    pub async fn change_sound(&mut self, sound: Sound) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(stopped) = self.manual_stop().await {
            events.push(stopped);
        }
        if sound != self.selected_sound {
            events.push(Event::SoundChanged {
                from: self.selected_sound,
                to: sound,
                at: Utc::now(),
            });
        }
        self.selected_sound = sound;
        events
    }

    /// Replace the duration text. Validated at the next start.
    pub fn change_duration(&mut self, text: impl Into<String>) {
        self.duration_text = text.into();
    }

    /// Release the countdown and any held audio, whatever the state.
    pub async fn dispose(&mut self) {
        if self.end_session(false).await.is_some() {
            debug!("disposed controller with an active session");
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn release(&mut self, handle: P::Handle) {
        if let Err(err) = self.player.stop(&handle).await {
            warn!(error = %err, "failed to stop ambient sound");
        }
        if let Err(err) = self.player.unload(handle).await {
            warn!(error = %err, "failed to unload ambient sound");
        }
    }
}
