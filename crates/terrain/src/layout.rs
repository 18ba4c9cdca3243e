//! Where aircraft park on the default airbase.

/// One parking spot: aircraft kind plus ground coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParkingSpot {
    /// Lowercase archetype name ("fighter", "cargo", "helicopter").
    pub kind: &'static str,
    pub x: f32,
    pub z: f32,
}

const fn spot(kind: &'static str, x: f32, z: f32) -> ParkingSpot {
    ParkingSpot { kind, x, z }
}

/// Fighters along the west apron, cargo on the outer stands, helicopters on the pads.
pub const AIRBASE_PARKING: [ParkingSpot; 9] = [
    spot("fighter", -60.0, -20.0),
    spot("fighter", -60.0, 0.0),
    spot("fighter", 30.0, -30.0),
    spot("cargo", -40.0, -40.0),
    spot("cargo", -40.0, 20.0),
    spot("cargo", 50.0, 40.0),
    spot("helicopter", -20.0, -60.0),
    spot("helicopter", -20.0, 60.0),
    spot("helicopter", 20.0, -50.0),
];
