//! Countdown implementation.
//!
//! The countdown has no thread and no clock of its own - the caller invokes
//! `tick()` once per second. Each call removes exactly one second.
//!
//! ## Usage
//!
//! ```ignore
//! let mut countdown = Countdown::from_minutes(10);
//! // Once per second:
//! if countdown.tick() == CountdownTick::Expired { /* end session */ }
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining_secs: u64 },
    /// Emitted on the 1 -> 0 transition.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
}

impl Countdown {
    pub fn from_minutes(minutes: u32) -> Self {
        Self::from_secs(u64::from(minutes).saturating_mul(60))
    }

    pub fn from_secs(secs: u64) -> Self {
        Self {
            total_secs: secs,
            remaining_secs: secs,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// 0.0 .. 1.0 elapsed fraction.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Remove one second. Never goes below zero.
    pub fn tick(&mut self) -> CountdownTick {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }
}

/// Render seconds as zero-padded `mm:ss`. Minutes widen past 99.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
