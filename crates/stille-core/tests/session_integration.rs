//! Session controller tests against a recording audio player.
//!
//! The fake player records each call so the tests can check how many times
//! the controller touched the audio layer, and in what order.

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use stille_core::{
    format_time, AudioError, AudioPlayer, Event, SessionController, SessionError, SessionPhase,
    SessionState, Sound, SoundLibrary,
};

// ============================================================================
// Recording player
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(PathBuf),
    Stop(u32),
    Unload(u32),
}

#[derive(Debug, Default)]
struct RecordingPlayer {
    calls: Vec<Call>,
    next_id: u32,
    fail_load: bool,
    fail_teardown: bool,
}

impl RecordingPlayer {
    fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    fn failing_teardown() -> Self {
        Self {
            fail_teardown: true,
            ..Self::default()
        }
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn loads(&self) -> usize {
        self.count(|c| matches!(c, Call::Load(_)))
    }

    fn stops(&self) -> usize {
        self.count(|c| matches!(c, Call::Stop(_)))
    }

    fn unloads(&self) -> usize {
        self.count(|c| matches!(c, Call::Unload(_)))
    }
}

impl AudioPlayer for RecordingPlayer {
    type Handle = u32;

    async fn load(&mut self, asset: &Path) -> Result<u32, AudioError> {
        self.calls.push(Call::Load(asset.to_path_buf()));
        if self.fail_load {
            return Err(AudioError::for_asset(asset, "decode failed"));
        }
        self.next_id += 1;
        Ok(self.next_id)
    }

    async fn stop(&mut self, handle: &u32) -> Result<(), AudioError> {
        self.calls.push(Call::Stop(*handle));
        if self.fail_teardown {
            return Err(AudioError::new("device gone"));
        }
        Ok(())
    }

    async fn unload(&mut self, handle: u32) -> Result<(), AudioError> {
        self.calls.push(Call::Unload(handle));
        if self.fail_teardown {
            return Err(AudioError::new("device gone"));
        }
        Ok(())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

fn controller(player: RecordingPlayer) -> SessionController<RecordingPlayer> {
    SessionController::new(player, SoundLibrary::new("/sounds"))
}

fn assert_idle(c: &SessionController<RecordingPlayer>) {
    assert_eq!(c.phase(), SessionPhase::Idle);
    assert!(!c.is_playing());
    assert!(!c.modal_visible());
    assert_eq!(c.time_left(), None);
    assert!(!c.has_audio());
}

// ============================================================================
// Selection defaults
// ============================================================================

#[test]
fn starts_idle_with_silence_and_ten_minutes() {
    let c = controller(RecordingPlayer::default());
    assert_idle(&c);
    assert_eq!(c.selected_sound(), Sound::Silence);
    assert_eq!(c.duration_text(), "10");
}

// ============================================================================
// start_session
// ============================================================================

#[tokio::test]
async fn invalid_duration_leaves_state_unchanged() {
    for input in ["0", "-3", "abc"] {
        let mut c = controller(RecordingPlayer::default());
        c.change_sound(Sound::Forest).await;
        c.change_duration(input);

        let err = c.start_session().await.unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidDuration {
                input: input.to_string()
            }
        );
        assert_idle(&c);
        assert_eq!(c.duration_text(), input);
        assert_eq!(c.player().loads(), 0);
    }
}

#[tokio::test]
async fn five_minutes_gives_three_hundred_seconds() {
    let mut c = controller(RecordingPlayer::default());
    c.change_duration("5");

    let events = c.start_session().await.unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        Event::SessionStarted {
            sound: Sound::Silence,
            duration_secs: 300,
            ..
        }
    ));
    assert!(c.is_playing());
    assert!(c.modal_visible());
    assert_eq!(c.time_left(), Some(300));
}

#[tokio::test]
async fn silence_never_touches_the_player() {
    let mut c = controller(RecordingPlayer::default());
    c.change_duration("1");
    c.start_session().await.unwrap();
    for _ in 0..60 {
        c.tick().await;
    }
    c.start_session().await.unwrap();
    c.manual_stop().await;
    c.dispose().await;
    assert!(c.player().calls.is_empty());
}

#[tokio::test]
async fn sound_is_loaded_once_from_library() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::DeepSpace).await;
    c.start_session().await.unwrap();

    assert_eq!(
        c.player().calls,
        vec![Call::Load(PathBuf::from("/sounds/deepspace.mp3"))]
    );
    assert!(c.has_audio());
    match c.state() {
        SessionState::Active(active) => {
            assert_eq!(active.sound, Sound::DeepSpace);
            assert_eq!(active.audio, Some(1));
            assert_eq!(active.countdown.remaining_secs(), 600);
        }
        SessionState::Idle => panic!("Expected an active session"),
    }
}

#[tokio::test]
async fn start_while_active_is_a_no_op() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::Forest).await;
    c.change_duration("2");
    c.start_session().await.unwrap();
    c.tick().await;

    let events = c.start_session().await.unwrap();
    assert!(events.is_empty());
    assert_eq!(c.time_left(), Some(119));
    assert_eq!(c.player().loads(), 1);
}

#[tokio::test]
async fn load_failure_keeps_countdown_running() {
    let mut c = controller(RecordingPlayer::failing_load());
    c.change_sound(Sound::AlphaWaves).await;
    c.change_duration("1");

    let events = c.start_session().await.unwrap();
    assert_eq!(events.len(), 2);
    match &events[1] {
        Event::AudioUnavailable { sound, message, .. } => {
            assert_eq!(*sound, Sound::AlphaWaves);
            assert!(message.contains("decode failed"));
        }
        other => panic!("Expected AudioUnavailable, got {other:?}"),
    }
    assert!(c.is_playing());
    assert!(!c.has_audio());

    assert!(matches!(c.tick().await, Some(Event::Tick { remaining_secs: 59, .. })));

    // Nothing was loaded, so nothing is released.
    c.manual_stop().await;
    assert_eq!(c.player().stops(), 0);
    assert_eq!(c.player().unloads(), 0);
}

// ============================================================================
// Ticking and expiry
// ============================================================================

#[tokio::test]
async fn one_minute_session_expires_exactly_once() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::Forest).await;
    c.change_duration("1");
    c.start_session().await.unwrap();
    assert_eq!(c.time_left(), Some(60));

    let mut finished = 0;
    for i in 1..=60u64 {
        match c.tick().await {
            Some(Event::Tick { remaining_secs, .. }) => {
                assert_eq!(remaining_secs, 60 - i);
                assert_eq!(c.time_left(), Some(remaining_secs));
            }
            Some(Event::SessionFinished { duration_secs, .. }) => {
                assert_eq!(i, 60);
                assert_eq!(duration_secs, 60);
                finished += 1;
            }
            other => panic!("unexpected tick result at {i}: {other:?}"),
        }
    }
    assert_eq!(finished, 1);
    assert_idle(&c);

    for _ in 0..5 {
        assert_eq!(c.tick().await, None);
    }
    assert_eq!(c.player().calls, vec![
        Call::Load(PathBuf::from("/sounds/forest.mp3")),
        Call::Stop(1),
        Call::Unload(1),
    ]);
}

#[tokio::test]
async fn ticks_while_idle_do_nothing() {
    let mut c = controller(RecordingPlayer::default());
    assert_eq!(c.tick().await, None);
    assert_idle(&c);
}

// ============================================================================
// Stopping
// ============================================================================

#[tokio::test]
async fn manual_stop_releases_audio_once() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::Forest).await;
    c.start_session().await.unwrap();
    c.tick().await;

    match c.manual_stop().await {
        Some(Event::SessionStopped {
            sound,
            remaining_secs,
            ..
        }) => {
            assert_eq!(sound, Sound::Forest);
            assert_eq!(remaining_secs, 599);
        }
        other => panic!("Expected SessionStopped, got {other:?}"),
    }
    assert_idle(&c);
    assert_eq!(c.player().stops(), 1);
    assert_eq!(c.player().unloads(), 1);

    // Second stop is idle.
    assert_eq!(c.manual_stop().await, None);
    assert_eq!(c.player().stops(), 1);
}

#[tokio::test]
async fn manual_stop_while_idle_is_a_no_op() {
    let mut c = controller(RecordingPlayer::default());
    assert_eq!(c.manual_stop().await, None);
    assert_idle(&c);
    assert!(c.player().calls.is_empty());
}

#[tokio::test]
async fn teardown_failures_still_end_the_session() {
    let mut c = controller(RecordingPlayer::failing_teardown());
    c.change_sound(Sound::DeepSpace).await;
    c.start_session().await.unwrap();

    assert!(matches!(
        c.manual_stop().await,
        Some(Event::SessionStopped { .. })
    ));
    assert_idle(&c);
    // Unload is attempted even though stop failed.
    assert_eq!(c.player().stops(), 1);
    assert_eq!(c.player().unloads(), 1);
}

#[tokio::test]
async fn restart_after_stop_acquires_a_fresh_handle() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::Forest).await;
    c.start_session().await.unwrap();
    c.manual_stop().await;
    c.start_session().await.unwrap();
    c.manual_stop().await;

    let calls = &c.player().calls;
    assert_eq!(calls[1..3], [Call::Stop(1), Call::Unload(1)]);
    assert_eq!(calls[4..], [Call::Stop(2), Call::Unload(2)]);
}

// ============================================================================
// Sound changes and disposal
// ============================================================================

#[tokio::test]
async fn changing_sound_while_playing_stops_first() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::Forest).await;
    c.start_session().await.unwrap();

    let events = c.change_sound(Sound::AlphaWaves).await;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::SessionStopped { sound: Sound::Forest, .. }));
    assert!(matches!(
        events[1],
        Event::SoundChanged {
            from: Sound::Forest,
            to: Sound::AlphaWaves,
            ..
        }
    ));
    assert_idle(&c);
    assert_eq!(c.selected_sound(), Sound::AlphaWaves);
    assert_eq!(c.player().unloads(), 1);
    // The new selection isn't loaded until the next start.
    assert_eq!(c.player().loads(), 1);
}

#[tokio::test]
async fn changing_sound_while_idle_only_updates_selection() {
    let mut c = controller(RecordingPlayer::default());
    let events = c.change_sound(Sound::Silence).await;
    assert!(events.is_empty());

    let events = c.change_sound(Sound::Forest).await;
    assert_eq!(events.len(), 1);
    assert!(c.player().calls.is_empty());
}

#[tokio::test]
async fn dispose_releases_held_audio() {
    let mut c = controller(RecordingPlayer::default());
    c.change_sound(Sound::Forest).await;
    c.start_session().await.unwrap();

    c.dispose().await;
    assert_idle(&c);
    assert_eq!(c.player().stops(), 1);
    assert_eq!(c.player().unloads(), 1);

    c.dispose().await;
    assert_eq!(c.player().unloads(), 1);
}

#[tokio::test]
async fn snapshot_reflects_active_session() {
    let mut c = controller(RecordingPlayer::default()).with_selection(Sound::Forest, "3");
    c.start_session().await.unwrap();
    c.tick().await;

    match c.snapshot() {
        Event::StateSnapshot {
            phase,
            selected_sound,
            duration_text,
            time_left_secs,
            audio_playing,
            ..
        } => {
            assert_eq!(phase, SessionPhase::Active);
            assert_eq!(selected_sound, Sound::Forest);
            assert_eq!(duration_text, "3");
            assert_eq!(time_left_secs, Some(179));
            assert!(audio_playing);
        }
        other => panic!("Expected StateSnapshot, got {other:?}"),
    }

    let json = serde_json::to_value(c.snapshot()).unwrap();
    assert_eq!(json["type"], "state_snapshot");
    assert_eq!(json["phase"], "active");
}

// ============================================================================
// format_time property
// ============================================================================

proptest! {
    #[test]
    fn format_time_matches_padded_minutes_and_seconds(n in 0u64..1_000_000) {
        let expected = format!("{:02}:{:02}", n / 60, n % 60);
        prop_assert_eq!(format_time(n), expected);
    }

    #[test]
    fn format_time_seconds_field_is_two_digits(n in 0u64..1_000_000) {
        let formatted = format_time(n);
        let (_, secs) = formatted.rsplit_once(':').unwrap();
        prop_assert_eq!(secs.len(), 2);
    }
}
