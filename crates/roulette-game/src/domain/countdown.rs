//! Round countdown.
//!
//! The countdown is a plain value; whoever owns the tick source calls
//! [`Countdown::tick`] once per second and stops when it reports
//! [`CountdownTick::Expired`].

use serde::Serialize;

/// Remaining time of a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    /// Length the countdown started with.
    pub total_seconds: u32,
    /// Seconds left.
    pub remaining_seconds: u32,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Still running with this many seconds left.
    Running(u32),
    /// Reached zero on this tick, or had already.
    Expired,
}

impl Countdown {
    /// A countdown starting at `seconds`.
    #[must_use]
    pub const fn start(seconds: u32) -> Self {
        Self {
            total_seconds: seconds,
            remaining_seconds: seconds,
        }
    }

    /// Removes one second.
    pub fn tick(&mut self) -> CountdownTick {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining_seconds)
        }
    }

    /// Whether no time is left.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_after_its_length_in_ticks() {
        let mut countdown = Countdown::start(3);

        assert_eq!(countdown.tick(), CountdownTick::Running(2));
        assert_eq!(countdown.tick(), CountdownTick::Running(1));
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert!(countdown.is_expired());
        assert_eq!(countdown.total_seconds, 3);
    }

    #[test]
    fn test_tick_after_expiry_stays_expired() {
        let mut countdown = Countdown::start(1);
        countdown.tick();

        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert_eq!(countdown.remaining_seconds, 0);
    }
}
