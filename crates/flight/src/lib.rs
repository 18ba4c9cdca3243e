//! Arcade flight model for the airbase aircraft.
//!
//! An `AircraftBody` integrates thrust, lift, drag and gravity each tick and
//! maps stick input onto its euler rotation. The archetype picks both the
//! constant table and the force strategy (fixed-wing or rotor).

pub mod aircraft;
pub mod archetype;
pub mod control;
pub mod force_model;

pub use aircraft::*;
pub use archetype::*;
pub use control::*;
pub use force_model::*;
