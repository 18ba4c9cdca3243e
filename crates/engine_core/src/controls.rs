//! Per-tick control vectors produced by an input source.
//!
//! Every axis is discrete: -1, 0 or +1. The simulation must accept an
//! all-zero snapshot every tick.

use glam::Vec2;

/// Flight axes for the possessed aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightInput {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub throttle: f32,
}

impl FlightInput {
    /// No stick, no throttle change. Used for unpossessed aircraft.
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
        throttle: 0.0,
    };

    /// Full throttle increase, centred stick.
    pub const FULL_THROTTLE: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
        throttle: 1.0,
    };

    /// Clamp every axis into `[-1, 1]`; NaN becomes 0.
    pub fn sanitized(self) -> Self {
        Self {
            pitch: axis(self.pitch),
            yaw: axis(self.yaw),
            roll: axis(self.roll),
            throttle: axis(self.throttle),
        }
    }
}

/// Walking axes: `x` strafes right, `z` moves backward (forward is -1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkInput {
    pub x: f32,
    pub z: f32,
}

impl WalkInput {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub fn sanitized(self) -> Self {
        Self {
            x: axis(self.x),
            z: axis(self.z),
        }
    }
}

/// Everything the pilot reads in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlSnapshot {
    pub flight: FlightInput,
    pub walk: WalkInput,
    /// Board a nearby aircraft.
    pub interact: bool,
    /// Leave the possessed aircraft.
    pub exit: bool,
    pub run: bool,
    pub jump: bool,
    /// Mouse movement since the previous snapshot, in pixels.
    pub mouse_delta: Vec2,
    pub pointer_locked: bool,
}

impl ControlSnapshot {
    /// Idle input: nothing pressed, no mouse motion.
    pub fn idle() -> Self {
        Self::default()
    }
}

#[inline]
fn axis(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}
