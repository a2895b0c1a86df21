//! Error types for the physics system

use thiserror::Error;

/// Physics system errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Rigid body not found
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(crate::body::RigidBodyHandle),

    /// Collider not found
    #[error("Collider not found: {0:?}")]
    ColliderNotFound(crate::collider::ColliderHandle),

    /// Invalid rigid body description
    #[error("Failed to create rigid body: {0}")]
    BodyCreationFailed(String),

    /// Shape creation failed
    #[error("Failed to create collision shape: {0}")]
    ShapeCreationFailed(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
