//! The timer screen.
//!
//! Everything runs on one current-thread runtime: the tick interval, input
//! lines and Ctrl-C are multiplexed with `select!`, so each event is handled
//! to completion before the next one is looked at. The interval only exists
//! while a session is active and is rebuilt on every start.
//!
//! Stdin is read on its own OS thread and forwarded over a channel. A read
//! blocked on the terminal can't be cancelled, so it must not hold up the
//! runtime when the screen exits.

use std::io::{BufRead, Write};

use stille_core::{format_time, AudioPlayer, Event, SessionController, SessionError, Sound};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, Interval};
use tracing::{debug, warn};

const TICK: Duration = Duration::from_secs(1);
const INPUT_BUFFER: usize = 16;

/// Forward stdin lines to a channel. The channel closes on EOF or a read
/// error.
pub fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Line-driven screen; runs until `quit`, EOF or Ctrl-C.
    Interactive,
    /// One session started immediately; exits when it ends.
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Screen<P: AudioPlayer> {
    controller: SessionController<P>,
    ticker: Option<Interval>,
    mode: Mode,
    bell: bool,
    json: bool,
}

impl<P: AudioPlayer> Screen<P> {
    pub fn new(controller: SessionController<P>, bell: bool, json: bool) -> Self {
        Self {
            controller,
            ticker: None,
            mode: Mode::Interactive,
            bell,
            json,
        }
    }

    /// Drive the screen until the user leaves. The controller is disposed
    /// on every exit path.
    pub async fn run(
        mut self,
        mode: Mode,
        input: mpsc::Receiver<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.mode = mode;
        let result = self.event_loop(mode, input).await;
        self.ticker = None;
        self.controller.dispose().await;
        result
    }

    async fn event_loop(
        &mut self,
        mode: Mode,
        mut input: mpsc::Receiver<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if mode == Mode::Single {
            self.start().await?;
        } else {
            self.print_selection();
        }

        let mut input_open = true;

        loop {
            tokio::select! {
                _ = next_tick(&mut self.ticker) => {
                    if let Some(event) = self.controller.tick().await {
                        self.render(&event);
                    }
                }
                line = input.recv(), if input_open => {
                    match line {
                        Some(line) => {
                            if self.handle_line(&line, mode).await == Flow::Quit {
                                break;
                            }
                        }
                        None if mode == Mode::Interactive => break,
                        None => {
                            debug!("input closed, session keeps running");
                            input_open = false;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!("interrupted");
                    break;
                }
            }

            self.sync_ticker();
            if mode == Mode::Single && !self.controller.is_playing() {
                break;
            }
        }
        Ok(())
    }

    async fn handle_line(&mut self, line: &str, mode: Mode) -> Flow {
        let line = line.trim();

        // Enter on the overlay stops the session.
        if line.is_empty() {
            if let Some(event) = self.controller.manual_stop().await {
                self.render(&event);
            }
            return Flow::Continue;
        }
        if mode == Mode::Single {
            return Flow::Continue;
        }

        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((line, ""));

        match command {
            "start" => {
                if self.controller.is_playing() {
                    self.notify("A session is already running. Press Enter to stop it.");
                } else if let Err(err) = self.start().await {
                    self.notify(&err.to_string());
                }
            }
            "stop" => match self.controller.manual_stop().await {
                Some(event) => self.render(&event),
                None => self.notify("No session is running."),
            },
            "duration" => {
                self.controller.change_duration(arg);
                self.print_selection();
            }
            "sound" => match arg.parse::<Sound>() {
                Ok(sound) => {
                    for event in self.controller.change_sound(sound).await {
                        self.render(&event);
                    }
                }
                Err(err) => self.notify(&err.to_string()),
            },
            "sounds" => {
                for sound in Sound::ALL {
                    let marker = if sound == self.controller.selected_sound() {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {:<12} {}", sound.name(), sound.label());
                }
            }
            "status" => self.render(&self.controller.snapshot()),
            "help" => print_help(),
            "quit" | "exit" => return Flow::Quit,
            other => self.notify(&format!("Unknown command '{other}'. Type 'help'.")),
        }
        Flow::Continue
    }

    async fn start(&mut self) -> Result<(), SessionError> {
        self.ticker = None;
        let events = self.controller.start_session().await?;
        for event in &events {
            self.render(event);
        }
        self.sync_ticker();
        Ok(())
    }

    /// Keep the interval in step with the session: present iff active.
    fn sync_ticker(&mut self) {
        match (self.controller.is_playing(), self.ticker.is_some()) {
            (true, false) => self.ticker = Some(interval_at(Instant::now() + TICK, TICK)),
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    fn render(&self, event: &Event) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "failed to serialize event"),
            }
            return;
        }

        match event {
            Event::SessionStarted {
                sound,
                duration_secs,
                ..
            } => {
                println!(
                    "Meditation started: {} with {}. Press Enter to stop.",
                    format_time(*duration_secs),
                    sound.label()
                );
                self.overlay(*duration_secs);
            }
            Event::Tick { remaining_secs, .. } => self.overlay(*remaining_secs),
            Event::AudioUnavailable { message, .. } => {
                println!();
                eprintln!("Could not load the audio file: {message}");
            }
            Event::SessionFinished { .. } => {
                let bell = if self.bell { "\x07" } else { "" };
                println!("\rThe meditation is over!{bell}");
            }
            Event::SessionStopped { remaining_secs, .. } => {
                println!("\rMeditation stopped with {} left.", format_time(*remaining_secs));
            }
            Event::SoundChanged { to, .. } => {
                println!("Sound: {}", to.label());
            }
            Event::StateSnapshot {
                phase,
                selected_sound,
                duration_text,
                time_left_secs,
                ..
            } => {
                println!(
                    "{phase:?} | sound: {} | duration: {duration_text} min | time left: {}",
                    selected_sound.label(),
                    time_left_secs.map(format_time).unwrap_or_else(|| "--:--".into())
                );
            }
        }

        if event.is_session_end() {
            self.after_session();
        }
    }

    /// Redraw the countdown line in place.
    fn overlay(&self, secs: u64) {
        print!("\r    {}    ", format_time(secs));
        if let Err(e) = std::io::stdout().flush() {
            debug!(error = %e, "failed to flush stdout");
        }
    }

    fn after_session(&self) {
        if self.mode == Mode::Interactive {
            self.print_selection();
        }
    }

    fn print_selection(&self) {
        if self.json {
            return;
        }
        println!(
            "Duration: {} min | Sound: {} | type 'start' to begin",
            self.controller.duration_text(),
            self.controller.selected_sound().label()
        );
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  duration <minutes>  set the session length");
    println!("  sound <name>        pick an ambient sound (stops a running session)");
    println!("  sounds              list the sounds");
    println!("  start               begin a session");
    println!("  stop | <Enter>      end the running session");
    println!("  status              show the current state");
    println!("  quit                leave");
}
