//! Transform change action.

use glam::Vec3;
use void_ecs::Entity;

use super::Command;
use crate::error::{CommandResult, EditorError};
use crate::math::Transform;
use crate::scene::Scene;

/// Set an object's local transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformAction {
    pub entity: Entity,
    pub old: Transform,
    pub new: Transform,
}

impl TransformAction {
    pub fn new(entity: Entity, old: Transform, new: Transform) -> Self {
        Self { entity, old, new }
    }

    /// Build an action from the object's current local transform to `new`
    pub fn capture(scene: &Scene, entity: Entity, new: Transform) -> Option<Self> {
        let old = scene.local_transform(entity)?;
        Some(Self::new(entity, old, new))
    }

    /// Build an action for a drag that already happened: `before` is the
    /// transform at the start of the gesture, the current one is the result.
    pub fn from_gesture(scene: &Scene, entity: Entity, before: Transform) -> Option<Self> {
        let now = scene.local_transform(entity)?;
        Some(Self::new(entity, before, now))
    }

    pub fn moved(scene: &Scene, entity: Entity, position: Vec3) -> Option<Self> {
        let old = scene.local_transform(entity)?;
        Some(Self::new(entity, old, old.with_position(position)))
    }

    pub fn rotated(scene: &Scene, entity: Entity, rotation: Vec3) -> Option<Self> {
        let old = scene.local_transform(entity)?;
        Some(Self::new(entity, old, old.with_rotation(rotation)))
    }

    pub fn scaled(scene: &Scene, entity: Entity, scale: Vec3) -> Option<Self> {
        let old = scene.local_transform(entity)?;
        Some(Self::new(entity, old, old.with_scale(scale)))
    }

    fn apply(&self, scene: &mut Scene, transform: Transform) -> CommandResult {
        if scene.set_transform(self.entity, transform) {
            Ok(())
        } else {
            Err(EditorError::ObjectNotFound(self.entity))
        }
    }
}

impl Command for TransformAction {
    fn description(&self) -> &str {
        if self.old.position != self.new.position
            && self.old.rotation == self.new.rotation
            && self.old.scale == self.new.scale
        {
            "Move"
        } else if self.old.rotation != self.new.rotation
            && self.old.position == self.new.position
            && self.old.scale == self.new.scale
        {
            "Rotate"
        } else if self.old.scale != self.new.scale
            && self.old.position == self.new.position
            && self.old.rotation == self.new.rotation
        {
            "Scale"
        } else {
            "Set Transform"
        }
    }

    fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        self.apply(scene, self.new)
    }

    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        self.apply(scene, self.old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectKind;

    #[test]
    fn test_move_redo_undo() {
        let mut scene = Scene::default();
        let e = scene.create_object("A", ObjectKind::Empty);

        let mut action = TransformAction::moved(&scene, e, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(action.description(), "Move");

        action.redo(&mut scene).unwrap();
        assert_eq!(scene.position(e), Some(Vec3::new(1.0, 2.0, 3.0)));
        action.undo(&mut scene).unwrap();
        assert_eq!(scene.position(e), Some(Vec3::ZERO));
    }

    #[test]
    fn test_gesture_records_existing_change() {
        let mut scene = Scene::default();
        let e = scene.create_object("A", ObjectKind::Empty);
        let before = scene.local_transform(e).unwrap();
        scene.set_scale(e, Vec3::splat(3.0));

        let action = TransformAction::from_gesture(&scene, e, before).unwrap();
        assert_eq!(action.description(), "Scale");
        assert_eq!(action.new.scale, Vec3::splat(3.0));
    }

    #[test]
    fn test_missing_object() {
        let mut scene = Scene::default();
        let ghost = Entity::from_raw(99);
        let mut action = TransformAction::new(ghost, Transform::IDENTITY, Transform::IDENTITY);
        assert_eq!(action.redo(&mut scene), Err(EditorError::ObjectNotFound(ghost)));
    }
}
