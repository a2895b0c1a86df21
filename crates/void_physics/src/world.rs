//! Physics world - main simulation container

use std::num::NonZeroUsize;

use rapier3d::prelude as rapier;

use crate::body::{to_isometry, RigidBodyDesc, RigidBodyHandle, RigidBodyType};
use crate::collider::{ColliderDesc, ColliderHandle};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Rapier physics pipeline
    pipeline: rapier::PhysicsPipeline,

    /// Gravity
    gravity: rapier::Vector<f32>,

    /// Integration parameters
    integration_params: rapier::IntegrationParameters,

    /// Island manager
    islands: rapier::IslandManager,

    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,

    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,

    /// Impulse joint set
    impulse_joints: rapier::ImpulseJointSet,

    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,

    /// CCD solver
    ccd_solver: rapier::CCDSolver,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,

    /// Number of fixed steps taken since creation
    step_count: u64,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Self {
        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1], config.gravity[2]);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.velocity_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            step_count: 0,
        }
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Fixed step size in seconds
    pub fn timestep(&self) -> f32 {
        self.integration_params.dt
    }

    /// Get gravity
    pub fn gravity(&self) -> [f32; 3] {
        [self.gravity.x, self.gravity.y, self.gravity.z]
    }

    // ==================== Rigid Bodies ====================

    /// Create a rigid body
    pub fn create_rigid_body(&mut self, desc: &RigidBodyDesc) -> Result<RigidBodyHandle> {
        desc.validate()?;
        let handle = self.bodies.insert(desc.to_rapier_builder());
        Ok(RigidBodyHandle(handle))
    }

    /// Remove a rigid body and any colliders still attached to it
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) -> Result<()> {
        self.bodies
            .remove(
                handle.0,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .map(|_| ())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Check if a body exists
    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    /// Get the engine-side type of a body
    pub fn body_type(&self, handle: RigidBodyHandle) -> Result<RigidBodyType> {
        let body = self.bodies.get(handle.0).ok_or(PhysicsError::BodyNotFound(handle))?;
        Ok(match body.body_type() {
            rapier::RigidBodyType::Fixed => RigidBodyType::Static,
            rapier::RigidBodyType::Dynamic => RigidBodyType::Dynamic,
            rapier::RigidBodyType::KinematicPositionBased
            | rapier::RigidBodyType::KinematicVelocityBased => RigidBodyType::Kinematic,
        })
    }

    /// Get rigid body position
    pub fn get_body_position(&self, handle: RigidBodyHandle) -> Result<[f32; 3]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let pos = b.translation();
                [pos.x, pos.y, pos.z]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body rotation (quaternion: x, y, z, w)
    pub fn get_body_rotation(&self, handle: RigidBodyHandle) -> Result<[f32; 4]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let rot = b.rotation();
                [rot.i, rot.j, rot.k, rot.w]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Teleport a body to a position and rotation
    ///
    /// Kinematic bodies also get the pose as their next kinematic target so
    /// the following step does not pull them back.
    pub fn set_body_transform(
        &mut self,
        handle: RigidBodyHandle,
        position: [f32; 3],
        rotation: [f32; 4],
    ) -> Result<()> {
        let body = self
            .bodies
            .get_mut(handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;

        let pose = to_isometry(position, rotation);
        body.set_position(pose, true);
        if body.is_kinematic() {
            body.set_next_kinematic_position(pose);
        }
        Ok(())
    }

    /// Get rigid body linear velocity
    pub fn get_body_linear_velocity(&self, handle: RigidBodyHandle) -> Result<[f32; 3]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let vel = b.linvel();
                [vel.x, vel.y, vel.z]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Set rigid body linear velocity
    pub fn set_body_linear_velocity(&mut self, handle: RigidBodyHandle, velocity: [f32; 3]) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| {
                b.set_linvel(rapier::Vector::new(velocity[0], velocity[1], velocity[2]), true);
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get rigid body angular velocity
    pub fn get_body_angular_velocity(&self, handle: RigidBodyHandle) -> Result<[f32; 3]> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let vel = b.angvel();
                [vel.x, vel.y, vel.z]
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Set rigid body angular velocity
    pub fn set_body_angular_velocity(&mut self, handle: RigidBodyHandle, velocity: [f32; 3]) -> Result<()> {
        self.bodies
            .get_mut(handle.0)
            .map(|b| {
                b.set_angvel(rapier::Vector::new(velocity[0], velocity[1], velocity[2]), true);
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get the total mass of a body
    pub fn get_body_mass(&self, handle: RigidBodyHandle) -> Result<f32> {
        self.bodies
            .get(handle.0)
            .map(|b| b.mass())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    // ==================== Colliders ====================

    /// Create a collider attached to a rigid body
    pub fn create_collider(&mut self, desc: &ColliderDesc, parent: RigidBodyHandle) -> Result<ColliderHandle> {
        desc.shape.validate()?;
        if !self.bodies.contains(parent.0) {
            return Err(PhysicsError::BodyNotFound(parent));
        }

        let handle = self
            .colliders
            .insert_with_parent(desc.to_rapier_builder(), parent.0, &mut self.bodies);
        Ok(ColliderHandle(handle))
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<()> {
        self.colliders
            .remove(handle.0, &mut self.islands, &mut self.bodies, true)
            .map(|_| ())
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Check if a collider exists
    pub fn contains_collider(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains(handle.0)
    }

    /// Set collider friction
    pub fn set_collider_friction(&mut self, handle: ColliderHandle, friction: f32) -> Result<()> {
        self.colliders
            .get_mut(handle.0)
            .map(|c| c.set_friction(friction))
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Set collider restitution
    pub fn set_collider_restitution(&mut self, handle: ColliderHandle, restitution: f32) -> Result<()> {
        self.colliders
            .get_mut(handle.0)
            .map(|c| c.set_restitution(restitution))
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Set collider mass
    pub fn set_collider_mass(&mut self, handle: ColliderHandle, mass: f32) -> Result<()> {
        self.colliders
            .get_mut(handle.0)
            .map(|c| c.set_mass(mass))
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Set collider density, replacing any explicit mass
    pub fn set_collider_density(&mut self, handle: ColliderHandle, density: f32) -> Result<()> {
        self.colliders
            .get_mut(handle.0)
            .map(|c| c.set_density(density))
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    // ==================== Simulation ====================

    /// Advance the simulation by exactly one fixed step
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.step_count += 1;
    }

    /// Number of fixed steps taken since creation
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    // ==================== Debug ====================

    /// Get number of rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.colliders.len())
            .field("step_count", &self.step_count)
            .finish()
    }
}
