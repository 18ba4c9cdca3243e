//! Core types shared by every airbase crate.
//!
//! This crate provides the contracts the simulation is built around:
//! - `FlightInput`, `WalkInput`, `ControlSnapshot`: the polled input contract
//! - `Pose`: position plus euler orientation (pitch, yaw, roll)
//! - `Terrain`: the ground-height query implemented by world crates
//! - `Time`: frame timing with a clamped delta
//! - `RenderSample`: the per-entity data an external renderer samples each frame

pub mod controls;
pub mod render;
pub mod terrain;
pub mod time;
pub mod transform;

pub use controls::*;
pub use render::*;
pub use terrain::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
