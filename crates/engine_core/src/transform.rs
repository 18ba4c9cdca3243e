//! Pose type and frame helpers for spatial positioning.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position plus euler orientation.
///
/// `rotation` holds pitch in `x`, yaw in `y` and roll in `z` (radians). The
/// angles are applied intrinsically as yaw, then pitch, then roll, so the
/// local forward axis is -Z and local up is +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Pose {
    /// Create a pose at the given position with level orientation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    /// Create a pose with position and euler rotation.
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    /// Orientation as a quaternion.
    pub fn orientation(&self) -> Quat {
        euler_to_quat(self.rotation)
    }

    /// Create the model matrix for this pose.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    /// Transform a body-frame offset into world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation() * local
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

/// Convert (pitch, yaw, roll) packed as x, y, z into a quaternion.
#[inline]
pub fn euler_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z)
}

/// Rotate `v` by yaw only (rotation about world +Y).
#[inline]
pub fn rotate_by_yaw(v: Vec3, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn level_pose_faces_negative_z() {
        let pose = Pose::default();
        assert!(approx(pose.forward(), Vec3::NEG_Z));
        assert!(approx(pose.up(), Vec3::Y));
        assert!(approx(pose.right(), Vec3::X));
    }

    #[test]
    fn positive_yaw_turns_forward_toward_negative_x() {
        let pose = Pose::new(Vec3::ZERO, Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        assert!(approx(pose.forward(), Vec3::NEG_X));
    }

    #[test]
    fn positive_pitch_raises_the_nose() {
        let pose = Pose::new(Vec3::ZERO, Vec3::new(0.3, 0.0, 0.0));
        assert!(pose.forward().y > 0.0);
    }

    #[test]
    fn to_world_applies_orientation_then_translation() {
        let pose = Pose::new(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, std::f32::consts::PI, 0.0),
        );
        // Half turn: the offset ahead of the body ends up on the +Z side.
        let p = pose.to_world(Vec3::new(0.0, 2.0, -8.0));
        assert!(approx(p, Vec3::new(10.0, 2.0, 8.0)));
    }
}
