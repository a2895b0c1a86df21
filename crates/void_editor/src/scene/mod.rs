//! Scene graph: objects, hierarchy, components and physics bodies.
//!
//! A [`Scene`] is the single context that owns everything an edit touches.
//! Objects live in an entity-keyed arena; the ordered object list and the
//! light list only hold entities, so undo can put an object back exactly
//! where it was.

mod hierarchy;
mod object;
mod physics_bridge;
mod snapshot;

pub use object::{LightKind, MeshHandle, ObjectKind, PrimitiveShape, SceneObject};
pub use physics_bridge::{PhysicsBridge, SyncDirection};
pub use snapshot::{ObjectSnapshot, SceneSnapshot};

use std::collections::HashMap;

use void_ecs::{Entity, EntityAllocator};
use void_physics::PhysicsConfig;

use crate::components::{
    ComponentStore, MaterialComponent, PhysicsComponent, PhysicsSettings, TransformComponent,
};
use crate::error::{CommandResult, EditorError};
use crate::math::Transform;

/// Everything needed to put a removed object back in place.
///
/// Produced by [`Scene::detach_object`] and consumed by
/// [`Scene::restore_object`].
#[derive(Clone, Debug)]
pub struct DetachedObject {
    object: SceneObject,
    /// Position in the ordered object list
    index: usize,
    /// Position in the light list
    light_index: Option<usize>,
    /// Position among the former parent's children
    sibling_index: Option<usize>,
    /// Children that were moved to the root, with their local transforms
    /// from before the move
    children: Vec<(Entity, Transform)>,
    physics: Option<PhysicsSettings>,
    material: Option<MaterialComponent>,
}

impl DetachedObject {
    pub fn entity(&self) -> Entity {
        self.object.entity
    }

    pub fn object(&self) -> &SceneObject {
        &self.object
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn light_index(&self) -> Option<usize> {
        self.light_index
    }

    pub fn physics(&self) -> Option<&PhysicsSettings> {
        self.physics.as_ref()
    }
}

/// Scene context
#[derive(Debug)]
pub struct Scene {
    objects: HashMap<Entity, SceneObject>,
    /// Object list in creation order
    order: Vec<Entity>,
    /// Light objects, in the same relative order as `order`
    lights: Vec<Entity>,
    entities: EntityAllocator,
    components: ComponentStore,
    physics: PhysicsBridge,
    default_physics: PhysicsSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl Scene {
    pub fn new(physics: PhysicsConfig) -> Self {
        let mut components = ComponentStore::new();
        components.register::<TransformComponent>();
        components.register::<PhysicsComponent>();
        components.register::<MaterialComponent>();

        Self {
            objects: HashMap::new(),
            order: Vec::new(),
            lights: Vec::new(),
            entities: EntityAllocator::new(),
            components,
            physics: PhysicsBridge::new(physics),
            default_physics: PhysicsSettings::default(),
        }
    }

    /// Settings used by [`Scene::enable_physics`] for objects without any
    pub fn with_default_physics(mut self, settings: PhysicsSettings) -> Self {
        self.default_physics = settings;
        self
    }

    pub fn default_physics(&self) -> &PhysicsSettings {
        &self.default_physics
    }

    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    pub fn physics(&self) -> &PhysicsBridge {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsBridge {
        &mut self.physics
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn object(&self, entity: Entity) -> Option<&SceneObject> {
        self.objects.get(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.objects.contains_key(&entity)
    }

    /// Objects in list order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.order.iter().filter_map(|e| self.objects.get(e))
    }

    /// Entities in list order
    pub fn object_ids(&self) -> &[Entity] {
        &self.order
    }

    pub fn lights(&self) -> &[Entity] {
        &self.lights
    }

    /// Position of an object in the ordered list
    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.order.iter().position(|e| *e == entity)
    }

    /// Objects without a parent, in list order
    pub fn roots(&self) -> impl Iterator<Item = Entity> + '_ {
        self.objects()
            .filter(|o| o.parent.is_none())
            .map(|o| o.entity)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.objects().find(|o| o.name == name).map(|o| o.entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create an object at the identity transform
    pub fn create_object(&mut self, name: impl Into<String>, kind: ObjectKind) -> Entity {
        self.create_object_with(name, kind, Transform::IDENTITY)
    }

    /// Create an object with an initial local transform
    pub fn create_object_with(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        transform: Transform,
    ) -> Entity {
        let entity = self.entities.allocate();
        let mut object = SceneObject::new(entity, name, kind);
        object.transform = transform;

        self.components.add(entity, TransformComponent::from(transform));
        if matches!(kind, ObjectKind::Primitive(_) | ObjectKind::Model) {
            self.components.add(entity, MaterialComponent::default());
        }

        if kind.is_light() {
            self.lights.push(entity);
        }
        self.order.push(entity);
        log::debug!("Created {} '{}' as {}", kind.name(), object.name, entity);
        self.objects.insert(entity, object);

        entity
    }

    pub fn rename(&mut self, entity: Entity, name: impl Into<String>) -> bool {
        match self.objects.get_mut(&entity) {
            Some(object) => {
                object.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_enabled(&mut self, entity: Entity, enabled: bool) -> bool {
        match self.objects.get_mut(&entity) {
            Some(object) => {
                object.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn set_mesh(&mut self, entity: Entity, mesh: Option<MeshHandle>) -> bool {
        match self.objects.get_mut(&entity) {
            Some(object) => {
                object.mesh = mesh;
                true
            }
            None => false,
        }
    }

    pub fn set_material(&mut self, entity: Entity, material: MaterialComponent) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.components.add(entity, material);
        true
    }

    /// Remove an object from the scene and return what is needed to restore it.
    ///
    /// Children are moved to the root keeping their world transforms. The
    /// physics body is released.
    pub fn detach_object(&mut self, entity: Entity) -> Option<DetachedObject> {
        let index = self.index_of(entity)?;
        let light_index = self.lights.iter().position(|e| *e == entity);

        let child_ids = self.objects.get(&entity)?.children.clone();
        let mut children = Vec::with_capacity(child_ids.len());
        for child in child_ids {
            if let Some(local) = self.objects.get(&child).map(|c| c.transform) {
                self.remove_parent(child);
                children.push((child, local));
            }
        }

        let sibling_index = self.unlink_from_parent(entity);

        let physics = self
            .components
            .get::<PhysicsComponent>(entity)
            .map(|p| p.settings);
        if physics.is_some() {
            self.disable_physics(entity);
        }
        let material = self.components.remove::<MaterialComponent>(entity);
        self.components.remove_entity(entity);

        self.order.remove(index);
        if let Some(li) = light_index {
            self.lights.remove(li);
        }

        let mut object = self.objects.remove(&entity)?;
        object.children.clear();
        self.entities.release(entity);
        log::debug!("Detached '{}' ({}) from index {}", object.name, entity, index);

        Some(DetachedObject {
            object,
            index,
            light_index,
            sibling_index,
            children,
            physics,
            material,
        })
    }

    /// Put a detached object back at its recorded positions.
    ///
    /// The recorded parent is re-linked if it still exists. Former children
    /// that are still at the root get their old local transforms back.
    pub fn restore_object(&mut self, detached: DetachedObject) -> CommandResult {
        let DetachedObject {
            mut object,
            index,
            light_index,
            sibling_index,
            children,
            physics,
            material,
        } = detached;
        let entity = object.entity;

        if self.objects.contains_key(&entity) {
            return Err(EditorError::InvalidOperation(format!(
                "{} is already in the scene",
                entity
            )));
        }

        if let Some(parent) = object.parent {
            match self.objects.get_mut(&parent) {
                Some(p) => {
                    let at = sibling_index.unwrap_or(p.children.len()).min(p.children.len());
                    p.children.insert(at, entity);
                }
                None => {
                    log::warn!("Parent {} of {} no longer exists, restoring at root", parent, entity);
                    object.parent = None;
                }
            }
        }

        let at = index.min(self.order.len());
        self.order.insert(at, entity);
        if object.is_light() {
            let at = light_index.unwrap_or(self.lights.len()).min(self.lights.len());
            self.lights.insert(at, entity);
        }

        self.entities.revive(entity);
        self.components.add(entity, TransformComponent::from(object.transform));
        if let Some(material) = material {
            self.components.add(entity, material);
        }
        log::debug!("Restored '{}' ({}) at index {}", object.name, entity, at);
        self.objects.insert(entity, object);

        for (child, local) in children {
            let at_root = self.objects.get(&child).map_or(false, |c| c.parent.is_none());
            if at_root {
                self.link_to_parent(child, entity, None);
                self.write_local(child, local);
            }
        }

        if let Some(settings) = physics {
            if let Err(err) = self.enable_physics_with(entity, settings) {
                log::warn!("Restored {} without a physics body: {}", entity, err);
            }
        }
        self.push_subtree_to_physics(entity);

        Ok(())
    }

    /// Remove an object permanently
    pub fn destroy_object(&mut self, entity: Entity) -> bool {
        self.detach_object(entity).is_some()
    }

    /// Remove every object
    pub fn clear(&mut self) {
        while let Some(&entity) = self.order.last() {
            if !self.destroy_object(entity) {
                break;
            }
        }
    }
}
