//! Transform hierarchy: local/world transforms and parenting

use glam::Vec3;
use void_ecs::Entity;

use super::Scene;
use crate::components::TransformComponent;
use crate::math::{self, Transform};

impl Scene {
    // ========================================================================
    // Local transforms
    // ========================================================================

    pub fn local_transform(&self, entity: Entity) -> Option<Transform> {
        self.objects.get(&entity).map(|o| o.transform)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.local_transform(entity).map(|t| t.position)
    }

    pub fn rotation(&self, entity: Entity) -> Option<Vec3> {
        self.local_transform(entity).map(|t| t.rotation)
    }

    pub fn scale(&self, entity: Entity) -> Option<Vec3> {
        self.local_transform(entity).map(|t| t.scale)
    }

    pub fn set_position(&mut self, entity: Entity, position: Vec3) -> bool {
        self.update_local(entity, |t| t.position = position)
    }

    /// Set the local rotation, Euler angles in radians
    pub fn set_rotation(&mut self, entity: Entity, rotation: Vec3) -> bool {
        self.update_local(entity, |t| t.rotation = rotation)
    }

    pub fn set_scale(&mut self, entity: Entity, scale: Vec3) -> bool {
        self.update_local(entity, |t| t.scale = scale)
    }

    pub fn set_transform(&mut self, entity: Entity, transform: Transform) -> bool {
        self.update_local(entity, |t| *t = transform)
    }

    fn update_local(&mut self, entity: Entity, f: impl FnOnce(&mut Transform)) -> bool {
        let Some(mut local) = self.local_transform(entity) else {
            return false;
        };
        f(&mut local);
        self.write_local(entity, local);
        self.push_subtree_to_physics(entity);
        true
    }

    /// Store a local transform in the object and its transform component
    /// without touching the physics engine.
    pub(crate) fn write_local(&mut self, entity: Entity, local: Transform) -> bool {
        match self.objects.get_mut(&entity) {
            Some(object) => {
                object.transform = local;
                self.components.add(entity, TransformComponent::from(local));
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // World transforms
    // ========================================================================

    /// World transform, composed from the root down
    pub fn world_transform(&self, entity: Entity) -> Option<Transform> {
        let object = self.objects.get(&entity)?;

        // Local transforms from the object up to its root
        let mut chain = vec![object.transform];
        let mut current = object.parent;
        while let Some(parent) = current {
            if chain.len() > self.objects.len() {
                log::error!("Cycle in hierarchy above {}", entity);
                break;
            }
            match self.objects.get(&parent) {
                Some(p) => {
                    chain.push(p.transform);
                    current = p.parent;
                }
                None => break,
            }
        }

        let mut locals = chain.into_iter().rev();
        let root = locals.next()?;
        Some(locals.fold(root, |world, local| Transform::compose(&world, &local)))
    }

    pub fn world_position(&self, entity: Entity) -> Option<Vec3> {
        self.world_transform(entity).map(|t| t.position)
    }

    pub fn world_rotation(&self, entity: Entity) -> Option<Vec3> {
        self.world_transform(entity).map(|t| t.rotation)
    }

    pub fn world_scale(&self, entity: Entity) -> Option<Vec3> {
        self.world_transform(entity).map(|t| t.scale)
    }

    fn parent_world(&self, entity: Entity) -> Option<Transform> {
        let parent = self.objects.get(&entity)?.parent?;
        self.world_transform(parent)
    }

    /// Place an object at a world transform, adjusting its local transform
    pub fn set_world_transform(&mut self, entity: Entity, world: Transform) -> bool {
        let Some(current) = self.local_transform(entity) else {
            return false;
        };
        let local = match self.parent_world(entity) {
            Some(parent) => Transform::relative_to(&world, &parent, current.scale),
            None => world,
        };
        self.write_local(entity, local);
        self.push_subtree_to_physics(entity);
        true
    }

    pub fn set_world_position(&mut self, entity: Entity, position: Vec3) -> bool {
        let local = match self.parent_world(entity) {
            Some(parent) => math::local_point(&parent, position),
            None => position,
        };
        self.set_position(entity, local)
    }

    pub fn set_world_rotation(&mut self, entity: Entity, rotation: Vec3) -> bool {
        let local = match self.parent_world(entity) {
            Some(parent) => rotation - parent.rotation,
            None => rotation,
        };
        self.set_rotation(entity, local)
    }

    pub fn set_world_scale(&mut self, entity: Entity, scale: Vec3) -> bool {
        let Some(current) = self.local_transform(entity) else {
            return false;
        };
        let local = match self.parent_world(entity) {
            Some(parent) => math::divide_scale(scale, parent.scale, current.scale),
            None => scale,
        };
        self.set_scale(entity, local)
    }

    // ========================================================================
    // Parenting
    // ========================================================================

    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.objects.get(&entity)?.parent
    }

    pub fn children_of(&self, entity: Entity) -> &[Entity] {
        self.objects
            .get(&entity)
            .map(|o| o.children.as_slice())
            .unwrap_or(&[])
    }

    /// All descendants, depth first
    pub fn descendants(&self, entity: Entity) -> Vec<Entity> {
        let mut out = Vec::new();
        let mut stack: Vec<Entity> = self.children_of(entity).iter().rev().copied().collect();
        while let Some(e) = stack.pop() {
            if out.len() > self.objects.len() {
                log::error!("Cycle in hierarchy below {}", entity);
                break;
            }
            out.push(e);
            stack.extend(self.children_of(e).iter().rev().copied());
        }
        out
    }

    /// Number of ancestors
    pub fn depth(&self, entity: Entity) -> usize {
        let mut depth = 0;
        let mut current = self.parent_of(entity);
        while let Some(p) = current {
            depth += 1;
            if depth > self.objects.len() {
                break;
            }
            current = self.parent_of(p);
        }
        depth
    }

    /// True if `ancestor` appears in the parent chain of `entity`
    pub fn is_descendant_of(&self, entity: Entity, ancestor: Entity) -> bool {
        let mut current = self.parent_of(entity);
        let mut steps = 0;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.objects.len() {
                return false;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Parent `entity` under `parent`, keeping its world transform.
    ///
    /// Parenting an object to itself is ignored and returns false. Cycles are
    /// not checked here; callers that accept user input go through
    /// [`ParentAction`](crate::commands::ParentAction), which rejects them.
    pub fn set_parent(&mut self, entity: Entity, parent: Entity) -> bool {
        if entity == parent {
            log::trace!("Ignoring request to parent {} to itself", entity);
            return false;
        }
        if !self.contains(entity) || !self.contains(parent) {
            return false;
        }
        if self.parent_of(entity) == Some(parent) {
            return true;
        }

        let Some(world) = self.world_transform(entity) else {
            return false;
        };
        self.unlink_from_parent(entity);
        self.link_to_parent(entity, parent, None);

        let fallback = self.objects.get(&entity).map_or(Vec3::ONE, |o| o.transform.scale);
        if let Some(parent_world) = self.world_transform(parent) {
            let local = Transform::relative_to(&world, &parent_world, fallback);
            self.write_local(entity, local);
        }
        log::debug!("Parented {} under {}", entity, parent);
        true
    }

    /// Move `entity` to the root, keeping its world transform.
    /// Returns false if it had no parent.
    pub fn remove_parent(&mut self, entity: Entity) -> bool {
        if self.parent_of(entity).is_none() {
            return false;
        }
        let Some(world) = self.world_transform(entity) else {
            return false;
        };
        self.unlink_from_parent(entity);
        if let Some(object) = self.objects.get_mut(&entity) {
            object.parent = None;
        }
        self.write_local(entity, world);
        log::debug!("Moved {} to root", entity);
        true
    }

    /// Re-link an object under `parent` at a sibling position and set its
    /// local transform verbatim.
    pub(crate) fn reparent_exact(
        &mut self,
        entity: Entity,
        parent: Option<Entity>,
        sibling_index: Option<usize>,
        local: Transform,
    ) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.unlink_from_parent(entity);
        match parent.filter(|p| self.contains(*p) && *p != entity) {
            Some(p) => self.link_to_parent(entity, p, sibling_index),
            None => {
                if let Some(object) = self.objects.get_mut(&entity) {
                    object.parent = None;
                }
            }
        }
        self.write_local(entity, local);
        self.push_subtree_to_physics(entity);
        true
    }

    /// Position of `entity` among its parent's children
    pub fn sibling_index(&self, entity: Entity) -> Option<usize> {
        let parent = self.parent_of(entity)?;
        self.children_of(parent).iter().position(|c| *c == entity)
    }

    /// Remove `entity` from its parent's child list. The object's own parent
    /// field is left as is. Returns the former sibling index.
    pub(crate) fn unlink_from_parent(&mut self, entity: Entity) -> Option<usize> {
        let parent = self.objects.get(&entity)?.parent?;
        let siblings = &mut self.objects.get_mut(&parent)?.children;
        let index = siblings.iter().position(|c| *c == entity)?;
        siblings.remove(index);
        Some(index)
    }

    pub(crate) fn link_to_parent(&mut self, entity: Entity, parent: Entity, index: Option<usize>) {
        if let Some(p) = self.objects.get_mut(&parent) {
            let at = index.unwrap_or(p.children.len()).min(p.children.len());
            p.children.insert(at, entity);
        }
        if let Some(object) = self.objects.get_mut(&entity) {
            object.parent = Some(parent);
        }
    }
}
