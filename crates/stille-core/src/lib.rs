//! # Stille Core Library
//!
//! Core logic for the Stille meditation timer. The `stille` CLI is a thin
//! terminal shell over this crate: it feeds user input in, calls `tick()`
//! once per second and renders the events that come back.
//!
//! ## Architecture
//!
//! - **Session Controller**: Two-state (Idle/Active) machine owning the
//!   selection, the countdown and the single ambient-sound handle
//! - **Countdown**: Tick-driven, one second per call, no internal thread
//! - **Audio**: [`AudioPlayer`] trait; the platform player lives in the CLI
//! - **Storage**: Read-only TOML configuration
//!
//! ## Key Components
//!
//! - [`SessionController`]: Start/stop/tick/sound-change operations
//! - [`Countdown`] and [`format_time`]: Remaining time and its `mm:ss` form
//! - [`Sound`] and [`SoundLibrary`]: The closed ambient sound catalog
//! - [`Config`]: Application configuration

pub mod audio;
pub mod error;
pub mod events;
pub mod session;
pub mod sound;
pub mod storage;
pub mod timer;

pub use audio::AudioPlayer;
pub use error::{AudioError, ConfigError, CoreError, Result, SessionError};
pub use events::Event;
pub use session::{parse_duration, SessionController, SessionPhase, SessionState};
pub use sound::{Sound, SoundLibrary};
pub use storage::Config;
pub use timer::{format_time, Countdown, CountdownTick};
