use std::path::Path;

use clap::Args;
use stille_core::{parse_duration, Config, SessionController, Sound};

use super::load_config;
use crate::audio::RodioPlayer;
use crate::screen::{stdin_lines, Mode, Screen};

#[derive(Args)]
pub struct StartArgs {
    /// Duration in minutes (default from config)
    #[arg(short, long)]
    duration: Option<String>,
    /// Ambient sound, e.g. "forest" (default from config)
    #[arg(short, long)]
    sound: Option<Sound>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn run_screen(config: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let controller = build_controller(&config, None, None)?;
    let screen = Screen::new(controller, config.notifications.bell, json);
    block_on(screen.run(Mode::Interactive, stdin_lines()))
}

pub fn run_start(config: Option<&Path>, args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let controller = build_controller(&config, args.sound, args.duration)?;
    let screen = Screen::new(controller, config.notifications.bell, args.json);
    block_on(screen.run(Mode::Single, stdin_lines()))
}

/// A `--duration` given on the command line is checked here, before any
/// runtime or audio device is set up.
fn build_controller(
    config: &Config,
    sound: Option<Sound>,
    duration: Option<String>,
) -> stille_core::Result<SessionController<RodioPlayer>> {
    if let Some(text) = &duration {
        parse_duration(text)?;
    }
    let player = RodioPlayer::new(config.volume_gain());
    let sound = sound.unwrap_or(config.session.default_sound);
    let duration = duration.unwrap_or_else(|| config.duration_text());
    Ok(SessionController::new(player, config.sound_library()?).with_selection(sound, duration))
}

fn block_on<F>(future: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
