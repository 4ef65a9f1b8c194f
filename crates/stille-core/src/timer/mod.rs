mod countdown;

pub use countdown::{format_time, Countdown, CountdownTick};
