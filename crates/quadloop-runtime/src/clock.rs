//! Time sources and the per-loop frame clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source; timestamps are offsets from the clock's own epoch.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock. Clones share the same time, so a host and a test harness can
/// both hold one.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Animation epoch plus timestamp of the most recently presented frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    pub start: Duration,
    pub last_frame: Duration,
}

impl FrameClock {
    /// Both timestamps start at `now`.
    pub fn starting_at(now: Duration) -> Self {
        Self {
            start: now,
            last_frame: now,
        }
    }

    pub fn since_last_frame(&self, now: Duration) -> Duration {
        now.saturating_sub(self.last_frame)
    }

    /// Animation time (seconds since `start`).
    pub fn animation_secs(&self, now: Duration) -> f32 {
        now.saturating_sub(self.start).as_secs_f32()
    }
}
