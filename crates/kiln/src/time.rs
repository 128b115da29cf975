//! Frame timing and delta time.
//!
//! [`Time`] tracks wall-clock frames as the host reports them. It is separate
//! from the simulation clock: frames arrive at whatever rate the host manages,
//! while systems always see the fixed step.

use std::time::Duration;

/// Frame timing, updated once per host frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Time {
    /// Duration of the previous frame.
    delta: Duration,
    /// Total time across all frames.
    elapsed: Duration,
    /// Frame counter.
    frame_count: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame that took `delta`.
    pub fn update(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Duration of the previous frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta time in seconds (f32), the most common way to use it.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total elapsed time across all frames.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total elapsed time in seconds (f32).
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Number of frames recorded so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated FPS based on the last frame's delta.
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}
