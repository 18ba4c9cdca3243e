//! A single aircraft: physical state, integrator and control response.

use engine_core::{FlightInput, Pose, RenderSample, Terrain, Vec3};
use std::f32::consts::TAU;
use thiserror::Error;

use crate::archetype::{Archetype, ForceModelKind, MS_TO_KNOTS};
use crate::control::{apply_control_input, wrap_angle};
use crate::force_model::{ForceBreakdown, ForceInputs};

/// Throttle change per second at full throttle input.
pub const THROTTLE_RATE: f32 = 0.5;
/// Height of the body origin above the ground when resting on it.
pub const REST_HEIGHT: f32 = 3.0;
/// How far below the previous floor a rolling body may drop in one tick and
/// still follow the ground instead of leaving it.
pub const GROUND_CONTACT_TOLERANCE: f32 = 1.0;
/// Default radius for `is_near_position`.
pub const NEAR_RADIUS: f32 = 10.0;
/// Rotor blade angular speed at full throttle (rad/s).
const ROTOR_SPIN_RATE: f32 = 20.0;

/// Invariant violations that freeze a body.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FlightFault {
    #[error("non-finite state after integration (position {position:?}, velocity {velocity:?})")]
    NonFinite { position: Vec3, velocity: Vec3 },
}

/// One aircraft on the airbase.
///
/// Parked bodies (`is_flying() == false`) ignore `update` entirely. A pilot
/// activates a body with `start_flying` and parks it with `stop_flying`.
#[derive(Debug, Clone)]
pub struct AircraftBody {
    archetype: Archetype,
    /// World-space position in metres.
    pub position: Vec3,
    /// Pitch (x), yaw (y), roll (z) in radians.
    pub rotation: Vec3,
    /// Linear velocity in m/s.
    pub velocity: Vec3,
    /// Rotation rate measured over the last tick (rad/s).
    angular_velocity: Vec3,
    throttle: f32,
    is_flying: bool,
    grounded: bool,
    rotor_phase: f32,
    forces: ForceBreakdown,
    fault: Option<FlightFault>,
    /// Pose after the last tick that ended with finite state.
    last_good: Pose,
}

impl AircraftBody {
    /// Create a parked aircraft at `position`, level and facing -Z.
    pub fn new(archetype: Archetype, position: Vec3) -> Self {
        Self {
            archetype,
            position,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            throttle: 0.0,
            is_flying: false,
            grounded: false,
            rotor_phase: 0.0,
            forces: ForceBreakdown::default(),
            fault: None,
            last_good: Pose::from_position(position),
        }
    }

    /// Same as `new`, with an initial heading in radians.
    pub fn with_heading(archetype: Archetype, position: Vec3, yaw: f32) -> Self {
        let mut body = Self::new(archetype, position);
        body.rotation.y = wrap_angle(yaw);
        body.last_good = body.pose();
        body
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    pub fn is_flying(&self) -> bool {
        self.is_flying
    }

    /// The body ended the last tick on the ground (rolling or resting).
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Acceleration terms from the last tick.
    pub fn forces(&self) -> &ForceBreakdown {
        &self.forces
    }

    /// Set when integration produced non-finite state; cleared by `start_flying`.
    pub fn fault(&self) -> Option<FlightFault> {
        self.fault
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// Speed in knots.
    pub fn airspeed_knots(&self) -> f32 {
        self.velocity.length() * MS_TO_KNOTS
    }

    /// Rotor blade angle for the renderer. Stays zero for fixed-wing bodies.
    pub fn rotor_phase(&self) -> f32 {
        self.rotor_phase
    }

    pub fn render_sample(&self, highlighted: bool) -> RenderSample {
        RenderSample {
            pose: self.pose(),
            rotor_phase: self.rotor_phase,
            highlighted,
        }
    }

    /// Hand the controls to a pilot: spool up and give the body an initial kick
    /// (forward for fixed-wing, upward for rotorcraft) in its current frame.
    pub fn start_flying(&mut self) {
        let spec = self.archetype.spec();
        self.is_flying = true;
        self.fault = None;
        self.throttle = spec.start_throttle;

        let kick = match spec.force_model {
            ForceModelKind::FixedWing => Vec3::NEG_Z,
            ForceModelKind::Rotor => Vec3::Y,
        } * spec.start_speed;
        self.velocity = self.pose().orientation() * kick;
        self.last_good = self.pose();
    }

    /// Park the body. Position and rotation are left where they are.
    pub fn stop_flying(&mut self) {
        self.is_flying = false;
        self.throttle = 0.0;
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// Snap onto the ground: rest height above `ground_height`, no velocity,
    /// wings level, heading kept. Does not change `is_flying`.
    pub fn settle_on_ground(&mut self, ground_height: f32) {
        self.position.y = ground_height + REST_HEIGHT;
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.rotation = Vec3::new(0.0, self.rotation.y, 0.0);
        self.grounded = true;
    }

    /// Turn the nose by mouse-look deltas (radians). Pitch is clamped to
    /// `pitch_limit` and then to the archetype's own limit.
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32, pitch_limit: f32) {
        if !(yaw_delta.is_finite() && pitch_delta.is_finite()) {
            return;
        }
        let control = &self.archetype.spec().control;
        let limit = pitch_limit.min(control.pitch_limit);
        self.rotation.y = wrap_angle(self.rotation.y + yaw_delta);
        self.rotation.x = (self.rotation.x + pitch_delta).clamp(-limit, limit);
    }

    /// Advance one tick. No-op while parked or for a non-positive `dt`.
    pub fn update(&mut self, dt: f32, input: &FlightInput, terrain: &dyn Terrain) {
        if !self.is_flying || !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        let input = input.sanitized();
        let spec = self.archetype.spec();

        self.throttle = (self.throttle + input.throttle * dt * THROTTLE_RATE).clamp(0.0, 1.0);
        let thrust = spec.max_thrust_newtons() * self.throttle;

        let pose = self.pose();
        self.forces = self.archetype.force_model().forces(&ForceInputs {
            spec,
            pose: &pose,
            velocity: self.velocity,
            thrust,
            controls: &input,
        });

        self.velocity += self.forces.net() * dt;
        self.position += self.velocity * dt;

        let previous = self.rotation;
        self.rotation = apply_control_input(self.rotation, &input, dt, &spec.control);
        let mut turned = self.rotation - previous;
        turned.y = wrap_angle(turned.y);
        self.angular_velocity = turned / dt;

        let floor = terrain.ground_height(self.position.x, self.position.z) + REST_HEIGHT;
        let sinking = self.position.y < floor && self.velocity.y < 0.0;
        // A rolling body follows the ground down a slope until it climbs away.
        let rolling = self.grounded
            && self.velocity.y <= 0.0
            && self.position.y <= floor + GROUND_CONTACT_TOLERANCE;
        self.grounded = sinking || rolling;
        if self.grounded {
            self.position.y = floor;
            self.velocity.y = 0.0;
        }

        if self.archetype.can_hover() {
            self.rotor_phase =
                (self.rotor_phase + dt * ROTOR_SPIN_RATE * self.throttle).rem_euclid(TAU);
        }

        if self.position.is_finite() && self.velocity.is_finite() && self.rotation.is_finite() {
            self.last_good = self.pose();
        } else {
            self.freeze(FlightFault::NonFinite {
                position: self.position,
                velocity: self.velocity,
            });
        }
    }

    /// Roll back to the last finite pose and park.
    fn freeze(&mut self, fault: FlightFault) {
        log::error!("{} frozen: {}", self.archetype, fault);
        self.fault = Some(fault);
        self.position = self.last_good.position;
        self.rotation = self.last_good.rotation;
        self.stop_flying();
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Strictly within `radius` of `point`.
    pub fn is_near(&self, point: Vec3, radius: f32) -> bool {
        self.distance_to_point(point) < radius
    }

    /// Strictly within `NEAR_RADIUS` of `point`.
    pub fn is_near_position(&self, point: Vec3) -> bool {
        self.is_near(point, NEAR_RADIUS)
    }
}
