//! Analytic height fields: the rolling airbase ground and a flat plane.

use engine_core::Terrain;

/// Rolling hills around the airbase.
///
/// `h(x, z) = 20 sin(0.01x) cos(0.01z) + 5 sin(0.05x) cos(0.05z) - 5`
#[derive(Debug, Clone, Copy, Default)]
pub struct AirbaseTerrain;

impl AirbaseTerrain {
    /// Large, slow swell.
    const SWELL_AMPLITUDE: f32 = 20.0;
    const SWELL_FREQUENCY: f32 = 0.01;
    /// Short ripples on top of the swell.
    const RIPPLE_AMPLITUDE: f32 = 5.0;
    const RIPPLE_FREQUENCY: f32 = 0.05;
    const BASE: f32 = -5.0;
}

impl Terrain for AirbaseTerrain {
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        let swell = (x * Self::SWELL_FREQUENCY).sin()
            * (z * Self::SWELL_FREQUENCY).cos()
            * Self::SWELL_AMPLITUDE;
        let ripple = (x * Self::RIPPLE_FREQUENCY).sin()
            * (z * Self::RIPPLE_FREQUENCY).cos()
            * Self::RIPPLE_AMPLITUDE;
        swell + ripple + Self::BASE
    }
}

/// Constant-height plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain {
    pub height: f32,
}

impl FlatTerrain {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Terrain for FlatTerrain {
    fn ground_height(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}
