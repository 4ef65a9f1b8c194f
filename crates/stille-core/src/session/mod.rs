mod controller;

pub use controller::{
    parse_duration, ActiveSession, SessionController, SessionPhase, SessionState,
    DEFAULT_DURATION_TEXT,
};
