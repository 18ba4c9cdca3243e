//! Stick input to euler rotation, with clamps and auto-stabilization.

use engine_core::FlightInput;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Inputs smaller than this count as "stick centred" for stabilization.
pub const STABILIZE_DEADZONE: f32 = 0.1;
/// Tick rate the per-tick stabilization factors are expressed at.
const STABILIZE_REFERENCE_HZ: f32 = 60.0;

/// Rotation rates (rad/s at full deflection) and attitude limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlResponse {
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub roll_rate: f32,
    /// Maximum |pitch| in radians.
    pub pitch_limit: f32,
    /// Maximum |roll| in radians.
    pub roll_limit: f32,
    /// Factor (< 1) applied per 1/60 s to an uncommanded pitch or roll.
    pub stabilization: f32,
    /// Yaw rate induced per radian of bank. Zero disables banked turns.
    pub bank_turn_rate: f32,
}

impl ControlResponse {
    /// Clamp pitch and roll into this response's limits.
    pub fn clamp_attitude(&self, rotation: Vec3) -> Vec3 {
        Vec3::new(
            rotation.x.clamp(-self.pitch_limit, self.pitch_limit),
            rotation.y,
            rotation.z.clamp(-self.roll_limit, self.roll_limit),
        )
    }
}

/// Apply one tick of stick input to `rotation` (pitch = x, yaw = y, roll = z).
///
/// Returns the new rotation with pitch and roll clamped and yaw wrapped to
/// `(-PI, PI]`. With the stick centred on an axis, that axis decays toward level.
pub fn apply_control_input(
    rotation: Vec3,
    input: &FlightInput,
    dt: f32,
    response: &ControlResponse,
) -> Vec3 {
    let mut r = rotation;
    r.z += input.roll * dt * response.roll_rate;
    r.x += input.pitch * dt * response.pitch_rate;
    r.y += input.yaw * dt * response.yaw_rate;

    // Banked turn: sustained roll drags the heading around.
    r.y += r.z * response.bank_turn_rate * dt;

    let damping = response.stabilization.powf(dt * STABILIZE_REFERENCE_HZ);
    if input.roll.abs() < STABILIZE_DEADZONE {
        r.z *= damping;
    }
    if input.pitch.abs() < STABILIZE_DEADZONE {
        r.x *= damping;
    }

    r = response.clamp_attitude(r);
    r.y = wrap_angle(r.y);
    r
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
