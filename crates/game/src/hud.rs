//! HUD readout: the numbers and prompts an external UI draws each frame.

use engine_core::Vec3;
use flight::{AircraftBody, MS_TO_KNOTS};
use std::fmt;

use crate::pilot::{AircraftCandidate, PilotMode};

/// Metres to feet.
pub const M_TO_FEET: f32 = 3.280_84;

/// All HUD data for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub mode: PilotMode,
    /// Speed in knots: the aircraft while flying, the pilot on foot.
    pub airspeed_knots: f32,
    /// Height above the origin plane in feet.
    pub altitude_feet: f32,
    /// Aircraft throttle in [0, 1], when flying.
    pub throttle: Option<f32>,
    pub position: Vec3,
    /// Boarding hint for the nearest aircraft in range.
    pub prompt: Option<String>,
}

impl HudReadout {
    pub fn walking(position: Vec3, velocity: Vec3, nearby: &[AircraftCandidate]) -> Self {
        Self {
            mode: PilotMode::Walking,
            airspeed_knots: velocity.length() * MS_TO_KNOTS,
            altitude_feet: position.y * M_TO_FEET,
            throttle: None,
            position,
            prompt: nearby.first().map(boarding_prompt),
        }
    }

    pub fn flying(body: &AircraftBody) -> Self {
        Self {
            mode: PilotMode::Flying,
            airspeed_knots: body.velocity.length() * MS_TO_KNOTS,
            altitude_feet: body.position.y * M_TO_FEET,
            throttle: Some(body.throttle()),
            position: body.position,
            prompt: None,
        }
    }
}

/// "Press E to enter FIGHTER (12m)"
pub fn boarding_prompt(candidate: &AircraftCandidate) -> String {
    format!(
        "Press E to enter {} ({}m)",
        candidate.archetype.name().to_uppercase(),
        candidate.distance.round() as i32
    )
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:.0} kt | {:.0} ft | pos ({:.1}, {:.1}, {:.1})",
            self.mode.label(),
            self.airspeed_knots,
            self.altitude_feet,
            self.position.x,
            self.position.y,
            self.position.z
        )?;
        if let Some(throttle) = self.throttle {
            write!(f, " | throttle {:.0}%", throttle * 100.0)?;
        }
        if let Some(prompt) = &self.prompt {
            write!(f, " | {}", prompt)?;
        }
        Ok(())
    }
}
