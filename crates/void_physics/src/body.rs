//! Rigid body types and descriptions

use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Handle to a rigid body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidBodyHandle(pub(crate) rapier::RigidBodyHandle);

impl RigidBodyHandle {
    /// Create from raw Rapier handle
    pub fn from_raw(handle: rapier::RigidBodyHandle) -> Self {
        Self(handle)
    }

    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::RigidBodyHandle {
        self.0
    }
}

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RigidBodyType {
    /// Static body - never moves, infinite mass
    Static,
    /// Kinematic body - moved by the user, pushes dynamic bodies
    Kinematic,
    /// Dynamic body - fully simulated
    #[default]
    Dynamic,
}

impl RigidBodyType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            RigidBodyType::Static => "Static",
            RigidBodyType::Kinematic => "Kinematic",
            RigidBodyType::Dynamic => "Dynamic",
        }
    }
}

impl From<RigidBodyType> for rapier::RigidBodyType {
    fn from(t: RigidBodyType) -> Self {
        match t {
            RigidBodyType::Static => rapier::RigidBodyType::Fixed,
            RigidBodyType::Kinematic => rapier::RigidBodyType::KinematicPositionBased,
            RigidBodyType::Dynamic => rapier::RigidBodyType::Dynamic,
        }
    }
}

/// Description for creating a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Type of rigid body
    pub body_type: RigidBodyType,
    /// Initial position
    pub position: [f32; 3],
    /// Initial rotation (quaternion: x, y, z, w)
    pub rotation: [f32; 4],
    /// Initial linear velocity
    pub linear_velocity: [f32; 3],
    /// Initial angular velocity
    pub angular_velocity: [f32; 3],
    /// Gravity scale (0 = no gravity, 1 = normal, 2 = double)
    pub gravity_scale: f32,
    /// Linear damping (air resistance)
    pub linear_damping: f32,
    /// Angular damping (rotational resistance)
    pub angular_damping: f32,
    /// Enable continuous collision detection
    pub ccd_enabled: bool,
    /// Can this body sleep when inactive
    pub can_sleep: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            linear_velocity: [0.0, 0.0, 0.0],
            angular_velocity: [0.0, 0.0, 0.0],
            gravity_scale: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            ccd_enabled: false,
            can_sleep: true,
        }
    }
}

impl RigidBodyDesc {
    /// Create a body description of the given type
    pub fn new(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            ..Default::default()
        }
    }

    /// Create a static body description
    pub fn fixed() -> Self {
        Self::new(RigidBodyType::Static)
    }

    /// Create a dynamic body description
    pub fn dynamic() -> Self {
        Self::new(RigidBodyType::Dynamic)
    }

    /// Create a kinematic body description
    pub fn kinematic() -> Self {
        Self::new(RigidBodyType::Kinematic)
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Set rotation (quaternion: x, y, z, w)
    pub fn with_rotation(mut self, rotation: [f32; 4]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Enable CCD
    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd_enabled = enabled;
        self
    }

    /// Reject descriptions the engine cannot represent
    pub fn validate(&self) -> Result<()> {
        let finite = self
            .position
            .iter()
            .chain(self.rotation.iter())
            .chain(self.linear_velocity.iter())
            .chain(self.angular_velocity.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(PhysicsError::BodyCreationFailed(
                "non-finite position, rotation or velocity".to_string(),
            ));
        }

        let norm_sq: f32 = self.rotation.iter().map(|v| v * v).sum();
        if norm_sq <= f32::EPSILON {
            return Err(PhysicsError::BodyCreationFailed(
                "rotation quaternion has zero length".to_string(),
            ));
        }

        Ok(())
    }

    /// Build a Rapier rigid body builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::RigidBodyBuilder {
        rapier::RigidBodyBuilder::new(self.body_type.into())
            .position(to_isometry(self.position, self.rotation))
            .linvel(rapier::Vector::new(
                self.linear_velocity[0],
                self.linear_velocity[1],
                self.linear_velocity[2],
            ))
            .angvel(rapier::Vector::new(
                self.angular_velocity[0],
                self.angular_velocity[1],
                self.angular_velocity[2],
            ))
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .ccd_enabled(self.ccd_enabled)
            .can_sleep(self.can_sleep)
    }
}

/// Build a Rapier isometry from a position and an `[x, y, z, w]` quaternion
pub(crate) fn to_isometry(position: [f32; 3], rotation: [f32; 4]) -> rapier::Isometry<f32> {
    rapier::Isometry::from_parts(
        rapier::Translation::new(position[0], position[1], position[2]),
        UnitQuaternion::from_quaternion(Quaternion::new(
            rotation[3],
            rotation[0],
            rotation[1],
            rotation[2],
        )),
    )
}
