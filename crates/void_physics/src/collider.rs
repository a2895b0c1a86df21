//! Collider types and descriptions

use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::material::PhysicsMaterial;

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

impl ColliderHandle {
    /// Create from raw Rapier handle
    pub fn from_raw(handle: rapier::ColliderHandle) -> Self {
        Self(handle)
    }

    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Collision shape type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with radius
    Sphere {
        radius: f32,
    },
    /// Box with half-extents
    Box {
        half_extents: [f32; 3],
    },
    /// Capsule aligned along Y axis
    Capsule {
        half_height: f32,
        radius: f32,
    },
    /// Cylinder aligned along Y axis
    Cylinder {
        half_height: f32,
        radius: f32,
    },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Box {
            half_extents: [0.5, 0.5, 0.5],
        }
    }
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a capsule shape (Y-aligned)
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self::Capsule { half_height, radius }
    }

    /// Create a cylinder shape (Y-aligned)
    pub fn cylinder(half_height: f32, radius: f32) -> Self {
        Self::Cylinder { half_height, radius }
    }

    /// Check the shape dimensions are usable by the engine
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PhysicsError::ShapeCreationFailed(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )))
            }
        }

        match self {
            Self::Sphere { radius } => positive("radius", *radius),
            Self::Box { half_extents } => {
                positive("half_extents.x", half_extents[0])?;
                positive("half_extents.y", half_extents[1])?;
                positive("half_extents.z", half_extents[2])
            }
            Self::Capsule { half_height, radius } => {
                // A capsule may degenerate to a sphere
                if !half_height.is_finite() || *half_height < 0.0 {
                    return Err(PhysicsError::ShapeCreationFailed(format!(
                        "half_height must be non-negative, got {}",
                        half_height
                    )));
                }
                positive("radius", *radius)
            }
            Self::Cylinder { half_height, radius } => {
                positive("half_height", *half_height)?;
                positive("radius", *radius)
            }
        }
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(&self) -> rapier::SharedShape {
        match self {
            Self::Sphere { radius } => rapier::SharedShape::ball(*radius),
            Self::Box { half_extents } => {
                rapier::SharedShape::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
            Self::Capsule { half_height, radius } => {
                rapier::SharedShape::capsule_y(*half_height, *radius)
            }
            Self::Cylinder { half_height, radius } => {
                rapier::SharedShape::cylinder(*half_height, *radius)
            }
        }
    }
}

/// Description for creating a collider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// Physics material
    pub material: PhysicsMaterial,
    /// Explicit mass; density from the material is used when `None`
    pub mass: Option<f32>,
    /// User data (entity ID, etc.)
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            material: PhysicsMaterial::default(),
            mass: None,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    /// Create a new collider description with a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Set material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set an explicit mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Set user data
    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::ColliderBuilder {
        let builder = rapier::ColliderBuilder::new(self.shape.to_rapier())
            .friction(self.material.friction)
            .restitution(self.material.restitution)
            .friction_combine_rule(self.material.friction_combine.into())
            .restitution_combine_rule(self.material.restitution_combine.into())
            .user_data(self.user_data);

        match self.mass {
            Some(mass) if mass > 0.0 => builder.mass(mass),
            _ => builder.density(self.material.density),
        }
    }
}
