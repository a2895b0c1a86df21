//! Synchronization between scene transforms and physics bodies.
//!
//! While editing, transforms flow from the scene into the engine. While
//! playing, the engine is stepped at a fixed rate and dynamic bodies flow
//! back into the scene after every completed step.

use glam::{Quat, Vec3};
use void_ecs::Entity;
use void_physics::{
    ColliderDesc, ColliderHandle, FixedTimestep, PhysicsConfig, PhysicsError, PhysicsMaterial,
    PhysicsWorld, RigidBodyDesc, RigidBodyHandle, RigidBodyType,
};

use super::Scene;
use crate::components::{PhysicsComponent, PhysicsSettings};
use crate::error::{CommandResult, EditorError};
use crate::math::{self, Transform};

/// Which side is authoritative for transforms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncDirection {
    /// Scene edits are pushed into the engine
    #[default]
    EcsToPhysics,
    /// Simulated bodies are written back into the scene
    PhysicsToEcs,
}

/// Physics engine plus the clock that drives it
#[derive(Debug)]
pub struct PhysicsBridge {
    world: PhysicsWorld,
    clock: FixedTimestep,
    direction: SyncDirection,
}

impl PhysicsBridge {
    pub fn new(config: PhysicsConfig) -> Self {
        let world = PhysicsWorld::new(config);
        let clock = FixedTimestep::new(world.timestep());
        Self {
            world,
            clock,
            direction: SyncDirection::EcsToPhysics,
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn direction(&self) -> SyncDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: SyncDirection) {
        if self.direction != direction {
            log::debug!("Physics sync direction: {:?}", direction);
        }
        self.direction = direction;
    }

    /// Seconds per simulation step
    pub fn fixed_step(&self) -> f32 {
        self.clock.step()
    }

    /// Unconsumed frame time
    pub fn accumulated(&self) -> f32 {
        self.clock.accumulated()
    }

    pub fn reset_accumulator(&mut self) {
        self.clock.reset();
    }

    /// Total steps the engine has taken
    pub fn steps_taken(&self) -> u64 {
        self.world.step_count()
    }

    fn create_body(
        &mut self,
        entity: Entity,
        world: &Transform,
        settings: &PhysicsSettings,
    ) -> Result<(RigidBodyHandle, ColliderHandle), PhysicsError> {
        let shape = settings.shape.collider_shape(world.scale);
        shape.validate()?;

        let ccd = self.world.config().ccd_enabled && settings.body_kind == RigidBodyType::Dynamic;
        let desc = RigidBodyDesc::new(settings.body_kind)
            .with_position(world.position.x, world.position.y, world.position.z)
            .with_rotation(world.rotation_quat().to_array())
            .with_ccd(ccd);
        let body = self.world.create_rigid_body(&desc)?;

        let collider = ColliderDesc::new(shape)
            .with_material(PhysicsMaterial::new(settings.friction, settings.restitution))
            .with_mass(settings.mass)
            .with_user_data(entity.to_user_data());

        match self.world.create_collider(&collider, body) {
            Ok(handle) => Ok((body, handle)),
            Err(err) => {
                if let Err(cleanup) = self.world.remove_rigid_body(body) {
                    log::warn!("Failed to release body after collider error: {}", cleanup);
                }
                Err(err)
            }
        }
    }

    fn release(&mut self, component: &PhysicsComponent) {
        if let Some(collider) = component.collider {
            if let Err(err) = self.world.remove_collider(collider) {
                log::warn!("Failed to remove collider: {}", err);
            }
        }
        if let Some(body) = component.body {
            if let Err(err) = self.world.remove_rigid_body(body) {
                log::warn!("Failed to remove rigid body: {}", err);
            }
        }
    }

    fn body_transform(&self, body: RigidBodyHandle) -> Result<(Vec3, Quat), PhysicsError> {
        let position = Vec3::from_array(self.world.get_body_position(body)?);
        let rotation = Quat::from_array(self.world.get_body_rotation(body)?);
        Ok((position, rotation))
    }
}

impl Scene {
    pub fn physics_component(&self, entity: Entity) -> Option<&PhysicsComponent> {
        self.components.get::<PhysicsComponent>(entity)
    }

    /// True if the object has a live physics body
    pub fn has_physics(&self, entity: Entity) -> bool {
        self.physics_component(entity).map_or(false, |p| p.initialized)
    }

    /// Enable physics with the given body kind.
    ///
    /// Existing settings are reused; otherwise the scene defaults apply with
    /// a collider matching the object's kind.
    pub fn enable_physics(&mut self, entity: Entity, body_kind: RigidBodyType) -> CommandResult {
        let object = self
            .objects
            .get(&entity)
            .ok_or(EditorError::ObjectNotFound(entity))?;
        let mut settings = match self.physics_component(entity) {
            Some(existing) => existing.settings,
            None => PhysicsSettings {
                shape: object.kind.default_collider(),
                ..self.default_physics
            },
        };
        settings.body_kind = body_kind;
        self.enable_physics_with(entity, settings)
    }

    /// Create (or recreate) the object's body from explicit settings.
    ///
    /// On failure the component is still attached with `initialized == false`
    /// and the error is returned.
    pub fn enable_physics_with(&mut self, entity: Entity, settings: PhysicsSettings) -> CommandResult {
        if !self.contains(entity) {
            return Err(EditorError::ObjectNotFound(entity));
        }
        if self.components.has::<PhysicsComponent>(entity) {
            self.disable_physics(entity);
        }
        let world = self
            .world_transform(entity)
            .ok_or(EditorError::ObjectNotFound(entity))?;

        let mut component = PhysicsComponent::new(settings);
        let result = match self.physics.create_body(entity, &world, &settings) {
            Ok((body, collider)) => {
                component.body = Some(body);
                component.collider = Some(collider);
                component.initialized = true;
                log::info!(
                    "Physics enabled for {} ({} {})",
                    entity,
                    settings.body_kind.name(),
                    settings.shape.name()
                );
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to create physics body for {}: {}", entity, err);
                Err(EditorError::Physics(err))
            }
        };
        self.components.add(entity, component);
        result
    }

    /// Release the object's body and remove its physics component
    pub fn disable_physics(&mut self, entity: Entity) -> bool {
        match self.components.remove::<PhysicsComponent>(entity) {
            Some(component) => {
                self.physics.release(&component);
                log::debug!("Physics disabled for {}", entity);
                true
            }
            None => false,
        }
    }

    /// Apply new settings. Material values are updated in place; a change of
    /// body kind or shape rebuilds the body.
    pub fn set_physics_settings(&mut self, entity: Entity, settings: PhysicsSettings) -> CommandResult {
        let current = self
            .physics_component(entity)
            .cloned()
            .ok_or(EditorError::ObjectNotFound(entity))?;

        let (_, collider) = match current.handles() {
            Some(handles)
                if current.settings.body_kind == settings.body_kind
                    && current.settings.shape == settings.shape =>
            {
                handles
            }
            _ => return self.enable_physics_with(entity, settings),
        };

        let world = &mut self.physics.world;
        world.set_collider_friction(collider, settings.friction)?;
        world.set_collider_restitution(collider, settings.restitution)?;
        if settings.mass > 0.0 {
            world.set_collider_mass(collider, settings.mass)?;
        } else {
            world.set_collider_density(collider, PhysicsMaterial::default().density)?;
        }
        if let Some(component) = self.components.get_mut::<PhysicsComponent>(entity) {
            component.settings = settings;
        }
        Ok(())
    }

    pub fn linear_velocity(&self, entity: Entity) -> Option<Vec3> {
        let (body, _) = self.physics_component(entity)?.handles()?;
        self.physics
            .world
            .get_body_linear_velocity(body)
            .ok()
            .map(Vec3::from_array)
    }

    pub fn set_linear_velocity(&mut self, entity: Entity, velocity: Vec3) -> bool {
        let Some((body, _)) = self.physics_component(entity).and_then(|p| p.handles()) else {
            return false;
        };
        self.physics
            .world
            .set_body_linear_velocity(body, velocity.to_array())
            .is_ok()
    }

    pub fn set_angular_velocity(&mut self, entity: Entity, velocity: Vec3) -> bool {
        let Some((body, _)) = self.physics_component(entity).and_then(|p| p.handles()) else {
            return false;
        };
        self.physics
            .world
            .set_body_angular_velocity(body, velocity.to_array())
            .is_ok()
    }

    // ========================================================================
    // Scene -> engine
    // ========================================================================

    /// Move an object's body to the object's world transform
    pub(crate) fn push_to_physics(&mut self, entity: Entity) {
        let Some((body, _)) = self.physics_component(entity).and_then(|p| p.handles()) else {
            return;
        };
        let Some(world) = self.world_transform(entity) else {
            return;
        };
        if let Err(err) = self.physics.world.set_body_transform(
            body,
            world.position.to_array(),
            world.rotation_quat().to_array(),
        ) {
            log::warn!("Failed to sync {} to physics: {}", entity, err);
        }
    }

    /// Push an object and every descendant while editing
    pub(crate) fn push_subtree_to_physics(&mut self, entity: Entity) {
        if self.physics.direction != SyncDirection::EcsToPhysics {
            return;
        }
        self.push_to_physics(entity);
        for descendant in self.descendants(entity) {
            self.push_to_physics(descendant);
        }
    }

    // ========================================================================
    // Engine -> scene
    // ========================================================================

    /// Advance the simulation by frame time `dt`, running as many fixed steps
    /// as have accumulated. Returns the number of steps taken.
    pub fn step_simulation(&mut self, dt: f32) -> usize {
        if self.physics.direction != SyncDirection::PhysicsToEcs {
            log::warn!("Ignoring simulation step while editing");
            return 0;
        }
        self.physics.clock.accumulate(dt);
        let mut steps = 0;
        while self.physics.clock.consume() {
            self.physics.world.step();
            self.pull_from_physics();
            steps += 1;
        }
        steps
    }

    /// Run exactly one fixed step regardless of accumulated time
    pub fn step_once(&mut self) -> bool {
        if self.physics.direction != SyncDirection::PhysicsToEcs {
            log::warn!("Ignoring simulation step while editing");
            return false;
        }
        self.physics.world.step();
        self.pull_from_physics();
        true
    }

    /// Copy dynamic bodies back into the scene. Parents are written before
    /// their children so child locals are computed against final parents.
    fn pull_from_physics(&mut self) {
        let mut bodies: Vec<(usize, Entity, RigidBodyHandle)> = self
            .components
            .iter::<PhysicsComponent>()
            .filter(|(_, p)| p.is_dynamic())
            .filter_map(|(e, p)| p.handles().map(|(body, _)| (e, body)))
            .map(|(e, body)| (self.depth(e), e, body))
            .collect();
        bodies.sort_by_key(|(depth, e, _)| (*depth, *e));

        for (_, entity, body) in bodies {
            let (position, rotation) = match self.physics.body_transform(body) {
                Ok(t) => t,
                Err(err) => {
                    log::warn!("Failed to read body of {}: {}", entity, err);
                    continue;
                }
            };
            let Some(current) = self.local_transform(entity) else {
                continue;
            };
            let scale = self.world_scale(entity).unwrap_or(current.scale);
            let world = Transform {
                position,
                rotation: math::quat_to_euler(rotation),
                scale,
            };
            let local = match self.parent_of(entity).and_then(|p| self.world_transform(p)) {
                Some(parent) => Transform::relative_to(&world, &parent, current.scale),
                None => world,
            };
            self.write_local(entity, local);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ShapeKind;
    use crate::scene::{ObjectKind, PrimitiveShape};

    fn cube(scene: &mut Scene, y: f32) -> Entity {
        scene.create_object_with(
            "Cube",
            ObjectKind::Primitive(PrimitiveShape::Cube),
            Transform::from_position(Vec3::new(0.0, y, 0.0)),
        )
    }

    #[test]
    fn test_enable_physics_creates_body() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 5.0);
        scene.enable_physics(e, RigidBodyType::Dynamic).unwrap();

        assert!(scene.has_physics(e));
        assert_eq!(scene.physics().world().body_count(), 1);
        assert_eq!(scene.physics_component(e).unwrap().settings.shape, ShapeKind::Box);
    }

    #[test]
    fn test_zero_scale_fails_without_crashing() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 0.0);
        scene.set_scale(e, Vec3::ZERO);

        let result = scene.enable_physics(e, RigidBodyType::Dynamic);
        assert!(matches!(result, Err(EditorError::Physics(_))));
        let component = scene.physics_component(e).unwrap();
        assert!(!component.initialized);
        assert_eq!(scene.physics().world().body_count(), 0);
    }

    #[test]
    fn test_edit_moves_push_into_engine() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 0.0);
        scene.enable_physics(e, RigidBodyType::Static).unwrap();
        scene.set_position(e, Vec3::new(3.0, 4.0, 5.0));

        let (body, _) = scene.physics_component(e).unwrap().handles().unwrap();
        let pos = scene.physics().world().get_body_position(body).unwrap();
        assert_eq!(pos, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_step_ignored_while_editing() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 10.0);
        scene.enable_physics(e, RigidBodyType::Dynamic).unwrap();

        assert_eq!(scene.step_simulation(1.0), 0);
        assert_eq!(scene.physics().steps_taken(), 0);
    }

    #[test]
    fn test_dynamic_body_falls_during_play() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 10.0);
        scene.enable_physics(e, RigidBodyType::Dynamic).unwrap();
        scene.physics_mut().set_direction(SyncDirection::PhysicsToEcs);

        let steps = scene.step_simulation(0.5);
        assert_eq!(steps, 30);
        assert!(scene.position(e).unwrap().y < 10.0);
    }

    #[test]
    fn test_disable_releases_body() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 0.0);
        scene.enable_physics(e, RigidBodyType::Dynamic).unwrap();
        assert!(scene.disable_physics(e));
        assert!(!scene.disable_physics(e));
        assert_eq!(scene.physics().world().body_count(), 0);
        assert_eq!(scene.physics().world().collider_count(), 0);
    }

    #[test]
    fn test_settings_update_in_place() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 0.0);
        scene.enable_physics(e, RigidBodyType::Dynamic).unwrap();
        let before = scene.physics_component(e).unwrap().handles();

        let settings = scene.physics_component(e).unwrap().settings.with_friction(0.9);
        scene.set_physics_settings(e, settings).unwrap();

        assert_eq!(scene.physics_component(e).unwrap().handles(), before);
        assert_eq!(scene.physics_component(e).unwrap().settings.friction, 0.9);
    }

    #[test]
    fn test_non_positive_mass_falls_back_to_density() {
        let mut scene = Scene::default();
        let e = cube(&mut scene, 0.0);
        let settings = PhysicsSettings::default().with_mass(4.0);
        scene.enable_physics_with(e, settings).unwrap();
        scene.physics_mut().set_direction(SyncDirection::PhysicsToEcs);
        let (body, _) = scene.physics_component(e).unwrap().handles().unwrap();

        scene.step_once();
        let mass = scene.physics().world().get_body_mass(body).unwrap();
        assert!((mass - 4.0).abs() < 1e-4);

        scene.set_physics_settings(e, settings.with_mass(0.0)).unwrap();
        scene.step_once();
        // Unit cube at unit density
        let mass = scene.physics().world().get_body_mass(body).unwrap();
        assert!((mass - 1.0).abs() < 1e-3);
        assert_eq!(scene.physics_component(e).unwrap().settings.mass, 0.0);
    }
}
