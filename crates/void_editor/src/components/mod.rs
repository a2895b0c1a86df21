//! Component types attached to scene objects
//!
//! The set of kinds is closed: transform, physics and material. Each kind is
//! kept in its own dense storage inside [`ComponentStore`].

mod store;

pub use store::{Component, ComponentStore};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use void_physics::{ColliderHandle, ColliderShape, RigidBodyHandle, RigidBodyType};

use crate::math::Transform;

/// Half thickness of the box collider standing in for a plane
pub const PLANE_HALF_THICKNESS: f32 = 0.01;

/// Identifies one component kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Transform,
    Physics,
    Material,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Transform,
        ComponentKind::Physics,
        ComponentKind::Material,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Physics => "Physics",
            ComponentKind::Material => "Material",
        }
    }
}

// ============================================================================
// Transform
// ============================================================================

/// Local transform mirrored into the component store
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformComponent {
    pub position: [f32; 3],
    /// Euler angles in radians
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for TransformComponent {
    fn default() -> Self {
        Transform::IDENTITY.into()
    }
}

impl From<Transform> for TransformComponent {
    fn from(t: Transform) -> Self {
        Self {
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
            scale: t.scale.to_array(),
        }
    }
}

impl From<TransformComponent> for Transform {
    fn from(c: TransformComponent) -> Self {
        Self {
            position: Vec3::from_array(c.position),
            rotation: Vec3::from_array(c.rotation),
            scale: Vec3::from_array(c.scale),
        }
    }
}

// ============================================================================
// Physics
// ============================================================================

/// Collider shape requested by a physics component
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Box,
    Sphere,
    Cylinder,
    Capsule,
    Plane,
}

impl ShapeKind {
    /// Collider dimensions for an object with the given world scale.
    ///
    /// A unit primitive spans one unit per axis, so every extent is half the
    /// scale on the relevant axis.
    pub fn collider_shape(&self, world_scale: Vec3) -> ColliderShape {
        let s = world_scale.abs();
        match self {
            ShapeKind::Box => ColliderShape::cuboid(s.x * 0.5, s.y * 0.5, s.z * 0.5),
            ShapeKind::Sphere => ColliderShape::sphere(s.x * 0.5),
            ShapeKind::Cylinder => ColliderShape::cylinder(s.y * 0.5, s.x * 0.5),
            ShapeKind::Capsule => {
                let radius = s.x * 0.5;
                ColliderShape::capsule((s.y * 0.5 - radius).max(0.0), radius)
            }
            ShapeKind::Plane => ColliderShape::cuboid(s.x * 0.5, PLANE_HALF_THICKNESS, s.z * 0.5),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Capsule => "Capsule",
            ShapeKind::Plane => "Plane",
        }
    }
}

/// User-editable physics parameters of an object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub body_kind: RigidBodyType,
    pub shape: ShapeKind,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            body_kind: RigidBodyType::Dynamic,
            shape: ShapeKind::Box,
            mass: 1.0,
            restitution: 0.0,
            friction: 0.5,
        }
    }
}

impl PhysicsSettings {
    pub fn new(body_kind: RigidBodyType, shape: ShapeKind) -> Self {
        Self {
            body_kind,
            shape,
            ..Default::default()
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

/// Physics participation of an object.
///
/// Handles are only meaningful while `initialized` is true; a failed body
/// creation leaves the component in place with `initialized == false`.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsComponent {
    pub settings: PhysicsSettings,
    pub body: Option<RigidBodyHandle>,
    pub collider: Option<ColliderHandle>,
    pub initialized: bool,
}

impl PhysicsComponent {
    pub fn new(settings: PhysicsSettings) -> Self {
        Self {
            settings,
            body: None,
            collider: None,
            initialized: false,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.settings.body_kind == RigidBodyType::Dynamic
    }

    /// Body and collider handles of an initialized component
    pub fn handles(&self) -> Option<(RigidBodyHandle, ColliderHandle)> {
        if !self.initialized {
            return None;
        }
        Some((self.body?, self.collider?))
    }
}

// ============================================================================
// Material
// ============================================================================

/// Surface appearance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialComponent {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for MaterialComponent {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

impl MaterialComponent {
    pub fn from_color(base_color: [f32; 4]) -> Self {
        Self {
            base_color,
            ..Default::default()
        }
    }
}
