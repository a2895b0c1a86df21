//! Scene snapshots taken when play mode starts

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use void_ecs::Entity;

use super::Scene;
use crate::math::Transform;

/// Saved state of one object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    /// Local transform
    pub transform: Transform,
    /// Linear velocity of the body, zero without physics
    pub linear_velocity: Vec3,
    pub had_physics: bool,
}

/// Transforms and velocities of every object at one point in time
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    objects: HashMap<Entity, ObjectSnapshot>,
}

impl SceneSnapshot {
    pub fn get(&self, entity: Entity) -> Option<&ObjectSnapshot> {
        self.objects.get(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.objects.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &ObjectSnapshot)> {
        self.objects.iter().map(|(e, s)| (*e, s))
    }
}

impl Scene {
    /// Record every object's local transform and body velocity
    pub fn capture_snapshot(&self) -> SceneSnapshot {
        let objects = self
            .objects()
            .map(|object| {
                let entity = object.entity;
                let had_physics = self.has_physics(entity);
                let snapshot = ObjectSnapshot {
                    transform: object.transform,
                    linear_velocity: self.linear_velocity(entity).unwrap_or(Vec3::ZERO),
                    had_physics,
                };
                (entity, snapshot)
            })
            .collect();
        SceneSnapshot { objects }
    }

    /// Put objects back to a snapshot.
    ///
    /// Local transforms are restored first, then bodies are moved to the
    /// resulting world transforms with their recorded linear velocity and no
    /// angular velocity. Objects missing from the snapshot are left alone.
    /// Returns the number of objects restored.
    pub fn restore_snapshot(&mut self, snapshot: &SceneSnapshot) -> usize {
        let mut restored = Vec::with_capacity(snapshot.len());
        for (entity, saved) in snapshot.iter() {
            if self.write_local(entity, saved.transform) {
                restored.push(entity);
            } else {
                log::debug!("Snapshot entry {} no longer exists", entity);
            }
        }

        for &entity in &restored {
            let Some(saved) = snapshot.get(entity) else {
                continue;
            };
            if self.has_physics(entity) {
                self.push_to_physics(entity);
                self.set_linear_velocity(entity, saved.linear_velocity);
                self.set_angular_velocity(entity, Vec3::ZERO);
            } else if saved.had_physics {
                log::warn!("{} lost its physics body during play", entity);
            }
        }

        let untracked = self.len().saturating_sub(restored.len());
        if untracked > 0 {
            log::debug!("{} objects were not part of the snapshot", untracked);
        }
        log::info!("Restored {} objects from snapshot", restored.len());
        restored.len()
    }
}
