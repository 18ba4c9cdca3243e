//! Aircraft archetypes and their constant tables.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

use crate::control::ControlResponse;
use crate::force_model::{FixedWingModel, ForceModel, RotorModel};

/// Pounds to kilograms.
pub const LB_TO_KG: f32 = 0.453_592;
/// Pound-force to newtons.
pub const LBF_TO_N: f32 = 4.448_222;
/// Square feet to square metres.
pub const SQFT_TO_M2: f32 = 0.092_903;
/// Metres per second to knots.
pub const MS_TO_KNOTS: f32 = 1.943_84;

/// Which force strategy drives an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceModelKind {
    FixedWing,
    Rotor,
}

/// Fixed aircraft categories found on the airbase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Fast, light jet. Highest thrust and speed ceiling.
    Fighter,
    /// Heavy transport. Largest wing, slowest to respond.
    Cargo,
    /// Rotorcraft. Can hover; no wing.
    Helicopter,
    /// Mid-range defaults.
    Generic,
}

/// Physical and handling constants for one archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeSpec {
    /// Level-flight speed ceiling in knots.
    pub max_speed_knots: f32,
    /// Full-throttle thrust in pound-force.
    pub max_thrust_lbf: f32,
    /// Gross weight in pounds.
    pub weight_lb: f32,
    /// Wing area in square feet. Zero for rotorcraft.
    pub wing_area_sqft: f32,
    pub force_model: ForceModelKind,
    /// Throttle set when a pilot takes the controls.
    pub start_throttle: f32,
    /// Speed of the kick applied by `start_flying`, along body forward
    /// (fixed-wing) or body up (rotor), in m/s.
    pub start_speed: f32,
    pub control: ControlResponse,
    /// Camera position relative to the body origin, in the body frame.
    pub cockpit_offset: Vec3,
}

const FIGHTER: ArchetypeSpec = ArchetypeSpec {
    max_speed_knots: 600.0,
    max_thrust_lbf: 25_000.0,
    weight_lb: 19_000.0,
    wing_area_sqft: 300.0,
    force_model: ForceModelKind::FixedWing,
    start_throttle: 0.8,
    start_speed: 40.0,
    control: ControlResponse {
        pitch_rate: 0.7,
        yaw_rate: 0.35,
        roll_rate: 0.9,
        pitch_limit: FRAC_PI_3,
        roll_limit: FRAC_PI_4,
        stabilization: 0.98,
        bank_turn_rate: 0.5,
    },
    cockpit_offset: Vec3::new(0.0, 2.0, -8.0),
};

const CARGO: ArchetypeSpec = ArchetypeSpec {
    max_speed_knots: 350.0,
    max_thrust_lbf: 17_000.0,
    weight_lb: 75_000.0,
    wing_area_sqft: 1745.0,
    force_model: ForceModelKind::FixedWing,
    start_throttle: 0.9,
    start_speed: 30.0,
    control: ControlResponse {
        pitch_rate: 0.3,
        yaw_rate: 0.2,
        roll_rate: 0.3,
        pitch_limit: FRAC_PI_4,
        roll_limit: FRAC_PI_6,
        stabilization: 0.985,
        bank_turn_rate: 0.3,
    },
    cockpit_offset: Vec3::new(0.0, 4.0, -15.0),
};

const HELICOPTER: ArchetypeSpec = ArchetypeSpec {
    max_speed_knots: 150.0,
    max_thrust_lbf: 5000.0,
    weight_lb: 11_000.0,
    wing_area_sqft: 0.0,
    force_model: ForceModelKind::Rotor,
    start_throttle: 0.6,
    start_speed: 2.0,
    control: ControlResponse {
        pitch_rate: 0.8,
        yaw_rate: 0.5,
        roll_rate: 0.8,
        pitch_limit: FRAC_PI_6,
        roll_limit: FRAC_PI_6,
        stabilization: 0.93,
        bank_turn_rate: 0.0,
    },
    cockpit_offset: Vec3::new(0.0, 2.0, -3.0),
};

const GENERIC: ArchetypeSpec = ArchetypeSpec {
    max_speed_knots: 400.0,
    max_thrust_lbf: 15_000.0,
    weight_lb: 30_000.0,
    wing_area_sqft: 500.0,
    force_model: ForceModelKind::FixedWing,
    start_throttle: 0.8,
    start_speed: 35.0,
    control: ControlResponse {
        pitch_rate: 0.5,
        yaw_rate: 0.3,
        roll_rate: 0.5,
        pitch_limit: FRAC_PI_3,
        roll_limit: FRAC_PI_4,
        stabilization: 0.98,
        bank_turn_rate: 0.4,
    },
    cockpit_offset: Vec3::new(0.0, 2.0, -8.0),
};

static FIXED_WING_MODEL: FixedWingModel = FixedWingModel;
static ROTOR_MODEL: RotorModel = RotorModel;

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Fighter,
        Archetype::Cargo,
        Archetype::Helicopter,
        Archetype::Generic,
    ];

    pub fn spec(self) -> &'static ArchetypeSpec {
        match self {
            Archetype::Fighter => &FIGHTER,
            Archetype::Cargo => &CARGO,
            Archetype::Helicopter => &HELICOPTER,
            Archetype::Generic => &GENERIC,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Fighter => "fighter",
            Archetype::Cargo => "cargo",
            Archetype::Helicopter => "helicopter",
            Archetype::Generic => "generic",
        }
    }

    /// Parse a lowercase archetype name. Unknown names map to `Generic`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fighter" => Archetype::Fighter,
            "cargo" => Archetype::Cargo,
            "helicopter" => Archetype::Helicopter,
            _ => Archetype::Generic,
        }
    }

    /// True for hover-capable archetypes.
    pub fn can_hover(self) -> bool {
        self.spec().force_model == ForceModelKind::Rotor
    }

    /// Force strategy for this archetype.
    pub fn force_model(self) -> &'static dyn ForceModel {
        match self.spec().force_model {
            ForceModelKind::FixedWing => &FIXED_WING_MODEL,
            ForceModelKind::Rotor => &ROTOR_MODEL,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ArchetypeSpec {
    /// Mass in kilograms.
    pub fn mass(&self) -> f32 {
        self.weight_lb * LB_TO_KG
    }

    /// Full-throttle thrust in newtons.
    pub fn max_thrust_newtons(&self) -> f32 {
        self.max_thrust_lbf * LBF_TO_N
    }

    /// Wing area in square metres.
    pub fn wing_area(&self) -> f32 {
        self.wing_area_sqft * SQFT_TO_M2
    }

    /// Speed ceiling in m/s.
    pub fn max_speed(&self) -> f32 {
        self.max_speed_knots / MS_TO_KNOTS
    }

    /// Quadratic drag coefficient (1/m).
    ///
    /// Chosen so that full thrust balances drag exactly at `max_speed`.
    pub fn drag_coefficient(&self) -> f32 {
        let v = self.max_speed();
        self.force_model.max_thrust_acceleration(self) / (v * v)
    }
}
