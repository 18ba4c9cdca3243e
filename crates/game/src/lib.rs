//! Airbase gameplay: the pilot state machine, its camera, and the frame loop
//! that steps the pilot and every aircraft together.

pub mod camera;
pub mod config;
pub mod hud;
pub mod pilot;
pub mod simulation;

pub use camera::{Camera, CameraPose, CameraSink, CameraUniform};
pub use config::{AircraftSpawn, ConfigError, GameConfig, PilotConfig, TerrainChoice};
pub use hud::HudReadout;
pub use pilot::{AircraftCandidate, EnterError, PilotController, PilotEvent, PilotMode};
pub use simulation::Simulation;
