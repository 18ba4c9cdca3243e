//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Longest step the simulation accepts (30 Hz). Longer pauses are truncated.
pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

/// Clamp a raw frame delta to `[0, max]`. Non-finite input yields zero.
#[inline]
pub fn clamp_dt(raw: f32, max: f32) -> f32 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(max)
    } else {
        0.0
    }
}

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time when the engine started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Restart delta measurement from now, e.g. after the loop was paused.
    pub fn reset_delta(&mut self) {
        self.last_frame = Instant::now();
        self.delta = Duration::ZERO;
    }

    /// Get the raw delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Delta time clamped to `max` seconds.
    pub fn clamped_delta_seconds(&self, max: f32) -> f32 {
        let raw = self.delta_seconds();
        let dt = clamp_dt(raw, max);
        if dt < raw {
            log::debug!("Frame took {:.3}s, clamped to {:.3}s", raw, dt);
        }
        dt
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        (self.last_frame - self.start_time).as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
