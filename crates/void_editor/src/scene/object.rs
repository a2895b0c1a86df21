//! Scene objects and their kinds

use serde::{Deserialize, Serialize};
use void_ecs::Entity;

use crate::components::ShapeKind;
use crate::math::Transform;

/// Opaque reference to renderable geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Built-in primitive meshes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveShape {
    Cube,
    Sphere,
    Cylinder,
    Capsule,
    Plane,
}

impl PrimitiveShape {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveShape::Cube => "Cube",
            PrimitiveShape::Sphere => "Sphere",
            PrimitiveShape::Cylinder => "Cylinder",
            PrimitiveShape::Capsule => "Capsule",
            PrimitiveShape::Plane => "Plane",
        }
    }

    pub fn all() -> &'static [PrimitiveShape] {
        &[
            PrimitiveShape::Cube,
            PrimitiveShape::Sphere,
            PrimitiveShape::Cylinder,
            PrimitiveShape::Capsule,
            PrimitiveShape::Plane,
        ]
    }

    /// Collider that matches the primitive's mesh
    pub fn collider_shape(&self) -> ShapeKind {
        match self {
            PrimitiveShape::Cube => ShapeKind::Box,
            PrimitiveShape::Sphere => ShapeKind::Sphere,
            PrimitiveShape::Cylinder => ShapeKind::Cylinder,
            PrimitiveShape::Capsule => ShapeKind::Capsule,
            PrimitiveShape::Plane => ShapeKind::Plane,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

/// What a scene object represents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Empty,
    Primitive(PrimitiveShape),
    Light(LightKind),
    Camera,
    Model,
}

impl ObjectKind {
    pub fn is_light(&self) -> bool {
        matches!(self, ObjectKind::Light(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Empty => "Empty",
            ObjectKind::Primitive(shape) => shape.name(),
            ObjectKind::Light(LightKind::Directional) => "Directional Light",
            ObjectKind::Light(LightKind::Point) => "Point Light",
            ObjectKind::Light(LightKind::Spot) => "Spot Light",
            ObjectKind::Camera => "Camera",
            ObjectKind::Model => "Model",
        }
    }

    /// Collider used when physics is enabled without an explicit shape
    pub fn default_collider(&self) -> ShapeKind {
        match self {
            ObjectKind::Primitive(shape) => shape.collider_shape(),
            _ => ShapeKind::Box,
        }
    }
}

/// A node of the scene graph.
///
/// Hierarchy links are entities, never references. They are only changed
/// through [`Scene`](super::Scene) so both directions stay consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub(crate) entity: Entity,
    /// Display name
    pub name: String,
    pub(crate) kind: ObjectKind,
    /// Cached local transform, mirrored into the transform component
    pub(crate) transform: Transform,
    pub(crate) parent: Option<Entity>,
    pub(crate) children: Vec<Entity>,
    /// Whether the object is active
    pub enabled: bool,
    pub mesh: Option<MeshHandle>,
}

impl SceneObject {
    pub(crate) fn new(entity: Entity, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            entity,
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            parent: None,
            children: Vec::new(),
            enabled: true,
            mesh: None,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn is_light(&self) -> bool {
        self.kind.is_light()
    }

    pub fn local_transform(&self) -> Transform {
        self.transform
    }

    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    pub fn children(&self) -> &[Entity] {
        &self.children
    }
}
