//! Object creation, deletion and re-parenting actions.

use void_ecs::Entity;

use super::Command;
use crate::components::PhysicsSettings;
use crate::error::{CommandResult, EditorError};
use crate::math::Transform;
use crate::scene::{DetachedObject, ObjectKind, Scene};

/// Create a new object.
///
/// The first `redo` creates the object. `undo` detaches it and keeps it, so
/// later redos bring back the same entity.
#[derive(Debug)]
pub struct CreateAction {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub physics: Option<PhysicsSettings>,
    created: Option<Entity>,
    detached: Option<DetachedObject>,
}

impl CreateAction {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            physics: None,
            created: None,
            detached: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_physics(mut self, settings: PhysicsSettings) -> Self {
        self.physics = Some(settings);
        self
    }

    /// Entity of the created object, once applied
    pub fn created_entity(&self) -> Option<Entity> {
        self.created
    }
}

impl Command for CreateAction {
    fn description(&self) -> &str {
        "Create Object"
    }

    fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        if let Some(detached) = self.detached.take() {
            return scene.restore_object(detached);
        }
        if self.created.is_some() {
            return Err(EditorError::InvalidOperation(format!(
                "'{}' is already created",
                self.name
            )));
        }

        let entity = scene.create_object_with(self.name.clone(), self.kind, self.transform);
        self.created = Some(entity);
        if let Some(settings) = self.physics {
            // The object stays even if the body could not be built
            if let Err(err) = scene.enable_physics_with(entity, settings) {
                log::warn!("Created '{}' without physics: {}", self.name, err);
            }
        }
        Ok(())
    }

    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        let entity = self
            .created
            .ok_or_else(|| EditorError::InvalidOperation("Nothing was created".to_string()))?;
        let detached = scene
            .detach_object(entity)
            .ok_or(EditorError::ObjectNotFound(entity))?;
        self.detached = Some(detached);
        Ok(())
    }
}

/// Delete an object.
///
/// Records the object's list index, light-list index, hierarchy links,
/// components and physics settings so undo puts it back exactly.
#[derive(Debug)]
pub struct DeleteAction {
    pub entity: Entity,
    detached: Option<DetachedObject>,
}

impl DeleteAction {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            detached: None,
        }
    }

    /// List index the object had when it was deleted
    pub fn original_index(&self) -> Option<usize> {
        self.detached.as_ref().map(|d| d.index())
    }

    /// Light-list index the object had when it was deleted
    pub fn original_light_index(&self) -> Option<usize> {
        self.detached.as_ref().and_then(|d| d.light_index())
    }
}

impl Command for DeleteAction {
    fn description(&self) -> &str {
        "Delete Object"
    }

    fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        let detached = scene
            .detach_object(self.entity)
            .ok_or(EditorError::ObjectNotFound(self.entity))?;
        log::info!("Deleted '{}'", detached.object().name);
        self.detached = Some(detached);
        Ok(())
    }

    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        let detached = self
            .detached
            .take()
            .ok_or_else(|| EditorError::InvalidOperation("No object to restore".to_string()))?;
        let name = detached.object().name.clone();
        scene.restore_object(detached)?;
        log::info!("Restored '{}'", name);
        Ok(())
    }
}

/// State of an object's hierarchy placement at one point in time
#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    parent: Option<Entity>,
    sibling_index: Option<usize>,
    local: Transform,
    world: Transform,
}

impl Placement {
    fn capture(scene: &Scene, entity: Entity) -> Option<Self> {
        Some(Self {
            parent: scene.parent_of(entity),
            sibling_index: scene.sibling_index(entity),
            local: scene.local_transform(entity)?,
            world: scene.world_transform(entity)?,
        })
    }

    /// Put the object back at this placement. The local transform is written
    /// verbatim when the recorded parent still exists; otherwise the world
    /// transform is restored at the root.
    fn apply(&self, scene: &mut Scene, entity: Entity) -> bool {
        match self.parent {
            Some(parent) if !scene.contains(parent) => {
                scene.reparent_exact(entity, None, None, self.world)
            }
            _ => scene.reparent_exact(entity, self.parent, self.sibling_index, self.local),
        }
    }
}

/// Move an object under a new parent (or to the root), keeping its world
/// placement.
#[derive(Debug)]
pub struct ParentAction {
    pub entity: Entity,
    pub new_parent: Option<Entity>,
    before: Option<Placement>,
    after: Option<Placement>,
}

impl ParentAction {
    pub fn new(entity: Entity, new_parent: Option<Entity>) -> Self {
        Self {
            entity,
            new_parent,
            before: None,
            after: None,
        }
    }

    /// Parent the object had before the action was applied
    pub fn old_parent(&self) -> Option<Entity> {
        self.before.and_then(|p| p.parent)
    }

    /// World transform before the action was first applied
    pub fn world_before(&self) -> Option<Transform> {
        self.before.map(|p| p.world)
    }

    /// World transform after the action was first applied
    pub fn world_after(&self) -> Option<Transform> {
        self.after.map(|p| p.world)
    }

    fn validate(&self, scene: &Scene) -> CommandResult {
        if !scene.contains(self.entity) {
            return Err(EditorError::ObjectNotFound(self.entity));
        }
        if let Some(parent) = self.new_parent {
            if !scene.contains(parent) {
                return Err(EditorError::ObjectNotFound(parent));
            }
            if parent == self.entity {
                return Err(EditorError::InvalidOperation(format!(
                    "Cannot parent {} to itself",
                    self.entity
                )));
            }
            if scene.is_descendant_of(parent, self.entity) {
                return Err(EditorError::InvalidOperation(format!(
                    "Cannot parent {} under its descendant {}",
                    self.entity, parent
                )));
            }
        }
        Ok(())
    }
}

impl Command for ParentAction {
    fn description(&self) -> &str {
        match self.new_parent {
            Some(_) => "Set Parent",
            None => "Clear Parent",
        }
    }

    fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        self.validate(scene)?;

        if let Some(after) = self.after {
            after.apply(scene, self.entity);
            return Ok(());
        }

        self.before = Placement::capture(scene, self.entity);
        match self.new_parent {
            Some(parent) => scene.set_parent(self.entity, parent),
            None => scene.remove_parent(self.entity),
        };
        self.after = Placement::capture(scene, self.entity);
        Ok(())
    }

    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        let before = self
            .before
            .ok_or_else(|| EditorError::InvalidOperation("Parent change was not applied".to_string()))?;
        if !before.apply(scene, self.entity) {
            return Err(EditorError::ObjectNotFound(self.entity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LightKind, PrimitiveShape};
    use glam::Vec3;

    #[test]
    fn test_create_undo_redo_keeps_entity() {
        let mut scene = Scene::default();
        let mut action = CreateAction::new("Cube", ObjectKind::Primitive(PrimitiveShape::Cube));

        action.redo(&mut scene).unwrap();
        let entity = action.created_entity().unwrap();
        action.undo(&mut scene).unwrap();
        assert!(!scene.contains(entity));

        action.redo(&mut scene).unwrap();
        assert!(scene.contains(entity));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_create_twice_fails() {
        let mut scene = Scene::default();
        let mut action = CreateAction::new("A", ObjectKind::Empty);
        action.redo(&mut scene).unwrap();
        assert!(action.redo(&mut scene).is_err());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_delete_undo_restores_index_and_light() {
        let mut scene = Scene::default();
        let a = scene.create_object("A", ObjectKind::Empty);
        let lamp = scene.create_object("Lamp", ObjectKind::Light(LightKind::Point));
        let b = scene.create_object("B", ObjectKind::Empty);

        let mut action = DeleteAction::new(lamp);
        action.redo(&mut scene).unwrap();
        assert_eq!(action.original_index(), Some(1));
        assert_eq!(action.original_light_index(), Some(0));
        assert!(scene.lights().is_empty());

        action.undo(&mut scene).unwrap();
        assert_eq!(scene.object_ids(), &[a, lamp, b]);
        assert_eq!(scene.lights(), &[lamp]);
    }

    #[test]
    fn test_delete_missing_object() {
        let mut scene = Scene::default();
        let mut action = DeleteAction::new(Entity::from_raw(42));
        assert_eq!(
            action.redo(&mut scene),
            Err(EditorError::ObjectNotFound(Entity::from_raw(42)))
        );
    }

    #[test]
    fn test_parent_undo_restores_world() {
        let mut scene = Scene::default();
        let a = scene.create_object_with(
            "A",
            ObjectKind::Empty,
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
        );
        let b = scene.create_object_with(
            "B",
            ObjectKind::Empty,
            Transform::new()
                .with_position(Vec3::new(5.0, 0.0, 0.0))
                .with_scale(Vec3::splat(2.0)),
        );

        let mut action = ParentAction::new(a, Some(b));
        action.redo(&mut scene).unwrap();
        assert_eq!(scene.parent_of(a), Some(b));
        assert_eq!(action.old_parent(), None);

        action.undo(&mut scene).unwrap();
        assert_eq!(scene.parent_of(a), None);
        assert!(scene.children_of(b).is_empty());
        assert_eq!(scene.world_transform(a), action.world_before());
    }

    #[test]
    fn test_parent_rejects_cycle() {
        let mut scene = Scene::default();
        let root = scene.create_object("Root", ObjectKind::Empty);
        let child = scene.create_object("Child", ObjectKind::Empty);
        scene.set_parent(child, root);

        let mut action = ParentAction::new(root, Some(child));
        assert!(matches!(
            action.redo(&mut scene),
            Err(EditorError::InvalidOperation(_))
        ));
        assert_eq!(scene.parent_of(root), None);
    }
}
