//! Per-entity data sampled by an external renderer once per frame.

use bytemuck::{Pod, Zeroable};

use crate::Pose;

/// Renderer-facing snapshot of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSample {
    pub pose: Pose,
    /// Rotor blade angle in radians, in `[0, TAU)`. Zero for fixed-wing bodies.
    pub rotor_phase: f32,
    /// Entity is inside the pilot's interaction radius.
    pub highlighted: bool,
}

/// Raw instance data for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderSampleRaw {
    pub model: [[f32; 4]; 4],
    /// x = rotor phase, y = highlight (0 or 1), zw unused.
    pub params: [f32; 4],
}

impl From<&RenderSample> for RenderSampleRaw {
    fn from(sample: &RenderSample) -> Self {
        Self {
            model: sample.pose.to_matrix().to_cols_array_2d(),
            params: [
                sample.rotor_phase,
                if sample.highlighted { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

impl From<RenderSample> for RenderSampleRaw {
    fn from(sample: RenderSample) -> Self {
        Self::from(&sample)
    }
}
