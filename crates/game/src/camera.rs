//! Camera pose sink and the default perspective camera.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Where the view sits this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

/// Receives the camera pose the pilot computes every tick.
pub trait CameraSink {
    fn set_pose(&mut self, pose: CameraPose);
}

impl<C: CameraSink + ?Sized> CameraSink for &mut C {
    fn set_pose(&mut self, pose: CameraPose) {
        (**self).set_pose(pose);
    }
}

/// Perspective camera with configurable FOV and clipping planes.
#[derive(Debug, Clone)]
pub struct Camera {
    pub pose: CameraPose,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Width / height.
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pose: CameraPose::default(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 10_000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl CameraSink for Camera {
    fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }
}

impl Camera {
    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn forward(&self) -> Vec3 {
        self.pose.forward()
    }

    /// View matrix. Follows the full orientation, so a banked aircraft tilts the horizon.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.pose.orientation, self.pose.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        let p = camera.position();
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            position: [p.x, p.y, p.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_maps_camera_position_to_origin() {
        let mut camera = Camera::default();
        camera.set_pose(CameraPose {
            position: Vec3::new(3.0, 4.0, 5.0),
            orientation: Quat::from_rotation_y(0.7),
        });
        let eye = camera.view_matrix().transform_point3(Vec3::new(3.0, 4.0, 5.0));
        assert!(eye.length() < 1e-4);
    }

    #[test]
    fn forward_point_lands_on_negative_z_in_view_space() {
        let mut camera = Camera::default();
        let orientation = Quat::from_rotation_y(1.2) * Quat::from_rotation_x(0.3);
        camera.set_pose(CameraPose {
            position: Vec3::ZERO,
            orientation,
        });
        let ahead = camera.view_matrix().transform_point3(camera.forward() * 10.0);
        assert!((ahead - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-3);
    }

    #[test]
    fn aspect_guards_against_zero_height() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }
}
