//! Ground height fields for the airbase world.
//!
//! Everything here implements `engine_core::Terrain`; mesh construction and
//! building placement live with the renderer, not here. `layout` holds the
//! default parking spots for the airbase fleet.

pub mod airbase;
pub mod layout;
pub mod noise_field;

pub use airbase::*;
pub use layout::*;
pub use noise_field::*;
