//! Error types for the editor core

use thiserror::Error;
use void_ecs::Entity;
use void_physics::PhysicsError;

/// Errors raised by scene edits and editor actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Entity not found in the scene
    #[error("Object not found: {0}")]
    ObjectNotFound(Entity),

    /// Request that cannot be applied in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Physics engine failure
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Result type for action execution
pub type CommandResult = Result<(), EditorError>;

/// Errors loading or saving editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
