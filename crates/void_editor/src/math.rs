//! Transform math shared by the scene graph and the physics boundary.
//!
//! Rotations are stored as Euler angles in radians. Every conversion between
//! Euler angles and quaternions goes through [`ROTATION_ORDER`] so that values
//! pushed into the physics engine and values read back from it agree.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Euler order used for every Euler/quaternion conversion
pub const ROTATION_ORDER: EulerRot = EulerRot::XYZ;

/// Determinant below which a parent matrix is treated as singular
const SINGULAR_EPSILON: f32 = 1e-12;

/// Convert Euler angles (radians) to a quaternion
#[inline]
pub fn euler_to_quat(euler: Vec3) -> Quat {
    Quat::from_euler(ROTATION_ORDER, euler.x, euler.y, euler.z)
}

/// Convert a quaternion to Euler angles (radians)
#[inline]
pub fn quat_to_euler(rotation: Quat) -> Vec3 {
    let (x, y, z) = rotation.normalize().to_euler(ROTATION_ORDER);
    Vec3::new(x, y, z)
}

/// Local or world transform of a scene object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Rotation as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        euler_to_quat(self.rotation)
    }

    /// TRS matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    /// World transform of a child with `local` under a parent whose world
    /// transform is `parent_world`.
    ///
    /// Position goes through the parent's TRS matrix, rotation is summed per
    /// axis and scale multiplies per axis.
    pub fn compose(parent_world: &Transform, local: &Transform) -> Transform {
        Transform {
            position: parent_world.matrix().transform_point3(local.position),
            rotation: parent_world.rotation + local.rotation,
            scale: parent_world.scale * local.scale,
        }
    }

    /// Inverse of [`Transform::compose`]: express `world` relative to a parent.
    ///
    /// Scale axes where the parent scale is zero keep `fallback_scale`.
    pub fn relative_to(world: &Transform, parent_world: &Transform, fallback_scale: Vec3) -> Transform {
        Transform {
            position: local_point(parent_world, world.position),
            rotation: world.rotation - parent_world.rotation,
            scale: divide_scale(world.scale, parent_world.scale, fallback_scale),
        }
    }

    /// Component-wise comparison with a tolerance
    pub fn abs_diff_eq(&self, other: &Transform, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && self.rotation.abs_diff_eq(other.rotation, epsilon)
            && self.scale.abs_diff_eq(other.scale, epsilon)
    }

    /// Check that every component is finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Map a world-space point into a parent's local space
pub(crate) fn local_point(parent_world: &Transform, point: Vec3) -> Vec3 {
    let matrix = parent_world.matrix();
    if matrix.determinant().abs() < SINGULAR_EPSILON {
        // Degenerate parent scale: drop scale and rotation, keep the offset.
        return point - parent_world.position;
    }
    matrix.inverse().transform_point3(point)
}

/// Per-axis `scale / parent`, using `fallback` where the parent axis is zero
pub(crate) fn divide_scale(scale: Vec3, parent: Vec3, fallback: Vec3) -> Vec3 {
    let axis = |s: f32, p: f32, f: f32| if p.abs() > f32::EPSILON { s / p } else { f };
    Vec3::new(
        axis(scale.x, parent.x, fallback.x),
        axis(scale.y, parent.y, fallback.y),
        axis(scale.z, parent.z, fallback.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euler_round_trip() {
        let euler = Vec3::new(0.3, -0.7, 1.2);
        let back = quat_to_euler(euler_to_quat(euler));
        assert_relative_eq!(back.x, euler.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, euler.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, euler.z, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_translation_only() {
        let parent = Transform::from_position(Vec3::new(5.0, 0.0, 0.0));
        let local = Transform::from_position(Vec3::new(-5.0, 0.0, 0.0));
        let world = Transform::compose(&parent, &local);
        assert!(world.position.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_compose_scale_and_rotation() {
        let parent = Transform::new()
            .with_rotation(Vec3::new(0.0, 0.5, 0.0))
            .with_scale(Vec3::new(2.0, 3.0, 4.0));
        let local = Transform::new()
            .with_rotation(Vec3::new(0.1, 0.2, 0.3))
            .with_scale(Vec3::new(0.5, 2.0, 1.0));

        let world = Transform::compose(&parent, &local);
        assert!(world.scale.abs_diff_eq(Vec3::new(1.0, 6.0, 4.0), 1e-6));
        assert!(world.rotation.abs_diff_eq(Vec3::new(0.1, 0.7, 0.3), 1e-6));
    }

    #[test]
    fn test_relative_to_inverts_compose() {
        let parent = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.4, -0.2, 0.9),
            scale: Vec3::new(2.0, 0.5, 1.5),
        };
        let local = Transform {
            position: Vec3::new(-3.0, 4.0, 0.5),
            rotation: Vec3::new(0.1, 0.1, -0.3),
            scale: Vec3::new(1.0, 2.0, 3.0),
        };

        let world = Transform::compose(&parent, &local);
        let back = Transform::relative_to(&world, &parent, Vec3::ONE);
        assert!(back.abs_diff_eq(&local, 1e-4), "{:?} != {:?}", back, local);
    }

    #[test]
    fn test_zero_parent_scale_keeps_fallback() {
        let parent = Transform::new().with_scale(Vec3::new(0.0, 1.0, 1.0));
        let world = Transform::new().with_scale(Vec3::new(3.0, 3.0, 3.0));
        let local = Transform::relative_to(&world, &parent, Vec3::new(7.0, 7.0, 7.0));
        assert_eq!(local.scale, Vec3::new(7.0, 3.0, 3.0));
        assert!(local.position.is_finite());
    }
}
