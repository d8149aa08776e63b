//! Soft frame-rate cap.
//!
//! A frame is due when strictly more than one interval has passed since the last *presented*
//! frame. `last_frame` is stamped after presentation, so render time is carried into the next
//! interval and the effective rate can fall below the target under load. There is no catch-up.

use std::time::Duration;

use quadloop_core::FrameRate;

use crate::clock::FrameClock;

/// Frame interval for `fps`, in whole milliseconds (`floor(1000 / fps)`).
pub fn frame_interval(fps: u32) -> Duration {
    FrameRate(fps).interval()
}

#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    interval: Duration,
    clock: FrameClock,
}

impl FrameScheduler {
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            clock: FrameClock::starting_at(now),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.clock
    }

    pub fn should_render(&self, now: Duration) -> bool {
        self.clock.since_last_frame(now) > self.interval
    }

    /// Records a presented frame; `now` is read after the buffer swap.
    pub fn frame_presented(&mut self, now: Duration) {
        self.clock.last_frame = now;
    }
}
