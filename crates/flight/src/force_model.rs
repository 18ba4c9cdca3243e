//! Force strategies: fixed-wing (thrust along the nose, lift from the wing)
//! and rotor (vertical rotor lift plus stick-driven cyclic translation).
//!
//! Both return accelerations (force already divided by mass).

use engine_core::{rotate_by_yaw, FlightInput, Pose};
use glam::Vec3;

use crate::archetype::{ArchetypeSpec, ForceModelKind};

/// Constant gravity.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
/// Sea-level air density (kg/m^3).
pub const AIR_DENSITY: f32 = 1.225;
/// Arcade boost on jet thrust.
pub const THRUST_SCALE: f32 = 1.5;
/// Arcade boost on rotor lift, so hover sits near 55% throttle.
pub const ROTOR_SCALE: f32 = 4.0;
/// No lift below this airspeed (m/s).
pub const LIFT_MIN_AIRSPEED: f32 = 10.0;
/// Lift coefficient at zero angle of attack.
pub const LIFT_COEFF_ZERO: f32 = 0.35;
/// Lift coefficient gain per unit `sin(angle of attack)`.
pub const LIFT_COEFF_SLOPE: f32 = 4.0;
/// Lift acceleration never exceeds this many g.
pub const MAX_LOAD_FACTOR: f32 = 6.0;
/// Cyclic acceleration at full stick (m/s^2).
pub const CYCLIC_ACCEL: f32 = 12.0;
/// Linear parasitic drag on the rotor body (1/s).
pub const ROTOR_LINEAR_DRAG: f32 = 0.1;

/// Acceleration terms computed for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceBreakdown {
    pub thrust: Vec3,
    pub gravity: Vec3,
    pub lift: Vec3,
    pub drag: Vec3,
    /// Stick-driven translation (rotor only).
    pub cyclic: Vec3,
}

impl ForceBreakdown {
    /// Sum of every term.
    pub fn net(&self) -> Vec3 {
        self.thrust + self.gravity + self.lift + self.drag + self.cyclic
    }
}

/// Body state a force model reads.
#[derive(Debug, Clone, Copy)]
pub struct ForceInputs<'a> {
    pub spec: &'a ArchetypeSpec,
    pub pose: &'a Pose,
    pub velocity: Vec3,
    /// Current thrust in newtons (`max thrust * throttle`).
    pub thrust: f32,
    pub controls: &'a FlightInput,
}

/// Strategy producing the net acceleration on a body.
pub trait ForceModel: Sync {
    fn forces(&self, inputs: &ForceInputs<'_>) -> ForceBreakdown;
}

impl ForceModelKind {
    /// Acceleration from `thrust` newtons on a body described by `spec`.
    pub fn thrust_acceleration(self, spec: &ArchetypeSpec, thrust: f32) -> f32 {
        let scale = match self {
            ForceModelKind::FixedWing => THRUST_SCALE,
            ForceModelKind::Rotor => ROTOR_SCALE,
        };
        thrust / spec.mass() * scale
    }

    /// Acceleration at full throttle.
    pub fn max_thrust_acceleration(self, spec: &ArchetypeSpec) -> f32 {
        self.thrust_acceleration(spec, spec.max_thrust_newtons())
    }
}

/// Quadratic drag `-k |v| v`.
#[inline]
pub fn quadratic_drag(velocity: Vec3, coefficient: f32) -> Vec3 {
    -coefficient * velocity.length() * velocity
}

/// Signed angle between the nose and the flight path, in radians.
///
/// Positive when the airflow meets the wing from below (nose above the
/// velocity vector). Zero at (near) zero airspeed.
pub fn angle_of_attack(forward: Vec3, up: Vec3, velocity: Vec3) -> f32 {
    let speed = velocity.length();
    if !(speed > f32::EPSILON) {
        return 0.0;
    }
    let dir = velocity / speed;
    // acos is only defined on [-1, 1]; rounding can push the dot just past it.
    let angle = forward.dot(dir).clamp(-1.0, 1.0).acos();
    if dir.dot(up) > 0.0 {
        -angle
    } else {
        angle
    }
}

/// Jets and props: thrust along the nose, lift along body up.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWingModel;

impl ForceModel for FixedWingModel {
    fn forces(&self, inputs: &ForceInputs<'_>) -> ForceBreakdown {
        let spec = inputs.spec;
        let forward = inputs.pose.forward();
        let up = inputs.pose.up();
        let velocity = inputs.velocity;
        let speed = velocity.length();

        let thrust =
            forward * ForceModelKind::FixedWing.thrust_acceleration(spec, inputs.thrust);

        let lift = if speed > LIFT_MIN_AIRSPEED && spec.wing_area_sqft > 0.0 {
            let aoa = angle_of_attack(forward, up, velocity);
            let cl = LIFT_COEFF_ZERO + LIFT_COEFF_SLOPE * aoa.sin();
            let dynamic_pressure = 0.5 * AIR_DENSITY * speed * speed;
            let max_lift = MAX_LOAD_FACTOR * -GRAVITY.y;
            let accel = (dynamic_pressure * spec.wing_area() * cl / spec.mass())
                .clamp(-max_lift, max_lift);
            up * accel
        } else {
            Vec3::ZERO
        };

        ForceBreakdown {
            thrust,
            gravity: GRAVITY,
            lift,
            drag: quadratic_drag(velocity, spec.drag_coefficient()),
            cyclic: Vec3::ZERO,
        }
    }
}

/// Rotorcraft: vertical rotor lift sustains hover, the stick translates the
/// body directly (rotor-disc tilt) without needing visible body tilt.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotorModel;

impl ForceModel for RotorModel {
    fn forces(&self, inputs: &ForceInputs<'_>) -> ForceBreakdown {
        let spec = inputs.spec;
        let lift = Vec3::Y * ForceModelKind::Rotor.thrust_acceleration(spec, inputs.thrust);

        // Stick forward (negative pitch) moves along the heading; yaw input slides
        // toward the side the nose turns.
        let local = Vec3::new(-inputs.controls.yaw, 0.0, inputs.controls.pitch) * CYCLIC_ACCEL;
        let cyclic = rotate_by_yaw(local, inputs.pose.rotation.y);

        let velocity = inputs.velocity;
        let drag = -ROTOR_LINEAR_DRAG * velocity
            + quadratic_drag(velocity, spec.drag_coefficient());

        ForceBreakdown {
            thrust: Vec3::ZERO,
            gravity: GRAVITY,
            lift,
            drag,
            cyclic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Archetype;

    fn forces_for(
        archetype: Archetype,
        pose: Pose,
        velocity: Vec3,
        throttle: f32,
        controls: FlightInput,
    ) -> ForceBreakdown {
        let spec = archetype.spec();
        archetype.force_model().forces(&ForceInputs {
            spec,
            pose: &pose,
            velocity,
            thrust: spec.max_thrust_newtons() * throttle,
            controls: &controls,
        })
    }

    #[test]
    fn angle_of_attack_zero_when_flying_along_the_nose() {
        let aoa = angle_of_attack(Vec3::NEG_Z, Vec3::Y, Vec3::new(0.0, 0.0, -50.0));
        assert!(aoa.abs() < 1e-6);
    }

    #[test]
    fn angle_of_attack_positive_when_sinking() {
        let aoa = angle_of_attack(Vec3::NEG_Z, Vec3::Y, Vec3::new(0.0, -5.0, -50.0));
        assert!(aoa > 0.0);
        let climbing = angle_of_attack(Vec3::NEG_Z, Vec3::Y, Vec3::new(0.0, 5.0, -50.0));
        assert!(climbing < 0.0);
    }

    #[test]
    fn angle_of_attack_is_finite_at_degenerate_speeds() {
        assert_eq!(angle_of_attack(Vec3::NEG_Z, Vec3::Y, Vec3::ZERO), 0.0);
        let tiny = angle_of_attack(Vec3::NEG_Z, Vec3::Y, Vec3::new(0.0, 0.0, -1e-30));
        assert!(tiny.is_finite());
        // Velocity exactly along the nose, scaled so the normalized dot may round past 1.
        let big = angle_of_attack(Vec3::NEG_Z, Vec3::Y, Vec3::new(0.0, 0.0, -3.0e7));
        assert!(big.is_finite());
    }

    #[test]
    fn fixed_wing_thrust_points_along_nose() {
        let f = forces_for(
            Archetype::Fighter,
            Pose::default(),
            Vec3::ZERO,
            1.0,
            FlightInput::ZERO,
        );
        assert!(f.thrust.z < 0.0);
        assert!(f.thrust.x.abs() < 1e-6 && f.thrust.y.abs() < 1e-6);
        assert_eq!(f.lift, Vec3::ZERO, "no lift at rest");
    }

    #[test]
    fn lift_requires_minimum_airspeed() {
        let slow = forces_for(
            Archetype::Generic,
            Pose::default(),
            Vec3::new(0.0, 0.0, -LIFT_MIN_AIRSPEED * 0.5),
            0.0,
            FlightInput::ZERO,
        );
        assert_eq!(slow.lift, Vec3::ZERO);

        let fast = forces_for(
            Archetype::Generic,
            Pose::default(),
            Vec3::new(0.0, 0.0, -120.0),
            0.0,
            FlightInput::ZERO,
        );
        assert!(fast.lift.y > 0.0);
    }

    #[test]
    fn lift_grows_with_airspeed() {
        let at = |a: Archetype, speed: f32| {
            forces_for(a, Pose::default(), Vec3::new(0.0, 0.0, -speed), 0.0, FlightInput::ZERO)
                .lift
                .y
        };
        assert!(at(Archetype::Fighter, 120.0) > at(Archetype::Fighter, 60.0));
    }

    #[test]
    fn drag_opposes_velocity_quadratically() {
        let v = Vec3::new(30.0, 0.0, -40.0);
        let f1 = forces_for(Archetype::Fighter, Pose::default(), v, 0.0, FlightInput::ZERO);
        let f2 = forces_for(Archetype::Fighter, Pose::default(), v * 2.0, 0.0, FlightInput::ZERO);
        assert!(f1.drag.dot(v) < 0.0);
        let ratio = f2.drag.length() / f1.drag.length();
        assert!((ratio - 4.0).abs() < 1e-3, "ratio {}", ratio);
    }

    #[test]
    fn full_thrust_balances_drag_at_max_speed() {
        let spec = Archetype::Fighter.spec();
        let v = Vec3::new(0.0, 0.0, -spec.max_speed());
        let f = forces_for(Archetype::Fighter, Pose::default(), v, 1.0, FlightInput::ZERO);
        assert!((f.thrust + f.drag).length() < 1e-2);
    }

    #[test]
    fn rotor_hovers_between_idle_and_full_throttle() {
        let up = |throttle: f32| {
            forces_for(
                Archetype::Helicopter,
                Pose::default(),
                Vec3::ZERO,
                throttle,
                FlightInput::ZERO,
            )
            .net()
            .y
        };
        assert!(up(1.0) > 0.0, "full throttle climbs");
        assert!(up(0.2) < 0.0, "low throttle sinks");
    }

    #[test]
    fn cyclic_ignores_body_tilt_and_follows_heading() {
        let pushed = FlightInput {
            pitch: -1.0,
            ..FlightInput::ZERO
        };
        let level = forces_for(Archetype::Helicopter, Pose::default(), Vec3::ZERO, 0.5, pushed);
        assert!(level.cyclic.z < 0.0, "stick forward moves along -Z");

        let tilted = Pose::new(Vec3::ZERO, Vec3::new(0.4, 0.0, 0.3));
        let f = forces_for(Archetype::Helicopter, tilted, Vec3::ZERO, 0.5, pushed);
        assert_eq!(f.cyclic, level.cyclic);

        let turned = Pose::new(Vec3::ZERO, Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let f = forces_for(Archetype::Helicopter, turned, Vec3::ZERO, 0.5, pushed);
        assert!(f.cyclic.x < -CYCLIC_ACCEL * 0.99);

        // Positive yaw turns the nose toward -X; the slide goes the same way.
        let left = FlightInput {
            yaw: 1.0,
            ..FlightInput::ZERO
        };
        let f = forces_for(Archetype::Helicopter, Pose::default(), Vec3::ZERO, 0.5, left);
        assert!(f.cyclic.x < -CYCLIC_ACCEL * 0.99, "slid {:?}", f.cyclic);
        assert!(f.cyclic.z.abs() < 1e-6);
    }
}
