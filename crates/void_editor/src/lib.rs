//! Void Engine Editor Core
//!
//! The runtime core of the Void Engine scene editor: live scene objects,
//! their transform hierarchy, optional physics bodies, and the reversible-edit
//! machinery that lets a user simulate a scene and roll it back.
//!
//! ## Features
//!
//! - **Component Store**: per-kind component arenas keyed by entity
//! - **Transform Hierarchy**: local/world transforms, re-parenting that keeps world placement
//! - **Physics Bridge**: Rapier bodies built from object shape and scale, synced one way per phase
//! - **Play Mode**: Edit/Play/Pause with snapshot and restore around Play sessions
//! - **Undo/Redo**: action history with transaction support
//!
//! ## Architecture
//!
//! ```text
//! UI edit → Action → UndoRedoSystem → Scene ──(Edit)──▶ PhysicsWorld
//!                                       ▲                   │
//!                                       └──────(Play)───────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use glam::Vec3;
//! use void_editor::prelude::*;
//!
//! let mut editor = EditorState::new();
//! let a = editor.scene.create_object("A", ObjectKind::Empty);
//! let b = editor.scene.create_object_with(
//!     "B",
//!     ObjectKind::Empty,
//!     Transform::from_position(Vec3::new(5.0, 0.0, 0.0)),
//! );
//!
//! editor.execute(ParentAction::new(a, Some(b))).unwrap();
//! assert!(editor.scene.position(a).unwrap().abs_diff_eq(Vec3::new(-5.0, 0.0, 0.0), 1e-5));
//!
//! editor.undo();
//! assert_eq!(editor.scene.parent_of(a), None);
//! ```

pub mod commands;
pub mod components;
pub mod core;
pub mod error;
pub mod math;
pub mod scene;

pub use crate::core::{
    CallbackId, EditorConfig, EditorState, SceneState, SceneStateManager, UndoRedoSystem,
};
pub use commands::{
    Action, ActionGroup, Command, CreateAction, DeleteAction, ParentAction, TransformAction,
};
pub use components::{
    Component, ComponentKind, ComponentStore, MaterialComponent, PhysicsComponent,
    PhysicsSettings, ShapeKind, TransformComponent, PLANE_HALF_THICKNESS,
};
pub use error::{CommandResult, ConfigError, EditorError};
pub use math::Transform;
pub use scene::{
    DetachedObject, LightKind, MeshHandle, ObjectKind, ObjectSnapshot, PrimitiveShape, Scene,
    SceneObject, SceneSnapshot, SyncDirection,
};

pub use void_ecs::Entity;
pub use void_physics::RigidBodyType;

pub mod prelude {
    //! Common imports
    pub use crate::commands::{
        Action, ActionGroup, Command, CreateAction, DeleteAction, ParentAction, TransformAction,
    };
    pub use crate::components::{MaterialComponent, PhysicsSettings, ShapeKind, TransformComponent};
    pub use crate::core::{EditorConfig, EditorState, SceneState};
    pub use crate::error::{CommandResult, EditorError};
    pub use crate::math::Transform;
    pub use crate::scene::{LightKind, ObjectKind, PrimitiveShape, Scene};
    pub use void_ecs::Entity;
    pub use void_physics::RigidBodyType;
}

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Void Engine Editor";
