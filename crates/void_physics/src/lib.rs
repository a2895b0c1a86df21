//! Void Physics - Rapier 3D Integration
//!
//! This crate is the physics engine boundary for the Void Engine editor. It
//! owns rigid bodies and colliders and exposes creation, stepping and
//! transform access; everything above it only holds opaque handles.
//!
//! # Features
//!
//! - Rigid body dynamics (static, kinematic, dynamic)
//! - Box, sphere, capsule and cylinder colliders
//! - Physics materials (friction, restitution, density or explicit mass)
//! - Fixed-timestep accumulator decoupled from frame time
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 PhysicsWorld                     │
//! │  ┌─────────────┐  ┌─────────────┐               │
//! │  │ RigidBodySet│  │ ColliderSet │               │
//! │  └─────────────┘  └─────────────┘               │
//! │  ┌─────────────────────────────────────────────┐│
//! │  │           PhysicsPipeline                   ││
//! │  │  (integration, collision, solver)          ││
//! │  └─────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────┘
//!                        ▲
//!                        │ one fixed step per consume()
//!                 ┌──────────────┐
//!                 │FixedTimestep │
//!                 └──────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use void_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//!
//! let body = physics
//!     .create_rigid_body(&RigidBodyDesc::dynamic().with_position(0.0, 10.0, 0.0))
//!     .unwrap();
//! physics
//!     .create_collider(&ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5)), body)
//!     .unwrap();
//!
//! let mut clock = FixedTimestep::new(physics.timestep());
//! clock.accumulate(1.0 / 30.0);
//! while clock.consume() {
//!     physics.step();
//! }
//! assert_eq!(physics.step_count(), 2);
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod error;
pub mod material;
pub mod timestep;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{RigidBodyDesc, RigidBodyHandle, RigidBodyType};
    pub use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::material::{CombineRule, PhysicsMaterial};
    pub use crate::timestep::FixedTimestep;
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
