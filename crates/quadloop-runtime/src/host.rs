//! Host-driven render loop.
//!
//! The host owns the window and event queue; the renderer owns GL state. The loop only
//! decides *when* to render.

use std::time::Duration;

use crate::clock::Clock;
use crate::schedule::FrameScheduler;

/// Windowing capability driven by [`run_loop`].
pub trait Host {
    /// External close signal (window close button, etc).
    fn should_close(&self) -> bool;
    /// Services pending window/input events without waiting for new ones.
    fn poll_events(&mut self);
    /// Presents the rendered frame.
    fn present(&mut self);
}

/// Per-frame context passed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCtx {
    /// Seconds since the loop started.
    pub time: f32,
    /// Index of this rendered frame, starting at 0.
    pub frame: u64,
}

pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameCtx);
}

impl<F: FnMut(&FrameCtx)> FrameRenderer for F {
    fn render(&mut self, frame: &FrameCtx) {
        self(frame)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub iterations: u64,
    pub frames: u64,
}

/// Runs until `host.should_close()`; renders at most one frame per iteration.
pub fn run_loop<H, R, C>(host: &mut H, renderer: &mut R, clock: &C, interval: Duration) -> LoopStats
where
    H: Host + ?Sized,
    R: FrameRenderer + ?Sized,
    C: Clock + ?Sized,
{
    let mut scheduler = FrameScheduler::new(interval, clock.now());
    let mut stats = LoopStats::default();

    tracing::info!(
        interval_ms = scheduler.interval().as_millis() as u64,
        "render loop started"
    );

    while !host.should_close() {
        stats.iterations += 1;

        let now = clock.now();
        if scheduler.should_render(now) {
            let ctx = FrameCtx {
                time: scheduler.frame_clock().animation_secs(now),
                frame: stats.frames,
            };
            renderer.render(&ctx);
            host.present();
            scheduler.frame_presented(clock.now());
            stats.frames += 1;
            tracing::trace!(frame = ctx.frame, time = ctx.time, "frame presented");
        }

        host.poll_events();
    }

    tracing::info!(
        iterations = stats.iterations,
        frames = stats.frames,
        "render loop finished"
    );
    stats
}
