//! Ground-height contract shared by the flight model and the pilot.

/// A height field over the XZ plane.
///
/// Implementations must be pure and deterministic: the same `(x, z)` always
/// yields the same height, and the surface is continuous.
pub trait Terrain {
    /// World-space ground height (Y) at the given horizontal position.
    fn ground_height(&self, x: f32, z: f32) -> f32;
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        (**self).ground_height(x, z)
    }
}

impl<T: Terrain + ?Sized> Terrain for std::rc::Rc<T> {
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        (**self).ground_height(x, z)
    }
}

impl<T: Terrain + ?Sized> Terrain for Box<T> {
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        (**self).ground_height(x, z)
    }
}
