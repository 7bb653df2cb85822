// src/clock.rs
use chrono::Duration;

use crate::types::Timestamp;

/// Tracks the maximum timestamp seen among accepted events.
///
/// The clock runs on event time, not wall-clock time: it only moves when an
/// accepted event carries a later timestamp, and it never moves backward.
#[derive(Debug, Clone)]
pub struct EventClock {
    latest: Option<Timestamp>,
    window: Duration,
}

impl EventClock {
    pub fn new(window: Duration) -> Self {
        Self {
            latest: None,
            window,
        }
    }

    /// Advance the clock to `max(clock, ts)`. Returns whether it changed.
    pub fn observe(&mut self, ts: Timestamp) -> bool {
        match self.latest {
            Some(latest) if ts <= latest => false,
            _ => {
                self.latest = Some(ts);
                true
            }
        }
    }

    pub fn latest(&self) -> Option<Timestamp> {
        self.latest
    }

    /// Lower bound of the current window, `None` until the first event.
    pub fn window_floor(&self) -> Option<Timestamp> {
        self.latest.map(|latest| latest - self.window)
    }

    /// Whether `ts` falls strictly before the current window floor.
    /// An edge exactly one window old is still inside (inclusive bound).
    pub fn is_late(&self, ts: Timestamp) -> bool {
        match self.window_floor() {
            Some(floor) => ts < floor,
            None => false,
        }
    }
}
