//! Physics configuration

use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: [f32; 3],

    /// Fixed timestep for physics simulation
    pub timestep: f32,

    /// Enable continuous collision detection on dynamic bodies
    pub ccd_enabled: bool,

    /// Default friction coefficient
    pub default_friction: f32,

    /// Default restitution (bounciness)
    pub default_restitution: f32,

    /// Solver iterations for velocity
    pub velocity_iterations: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 1.0 / 60.0,
            ccd_enabled: false,
            default_friction: 0.5,
            default_restitution: 0.0,
            velocity_iterations: 4,
        }
    }
}

impl PhysicsConfig {
    /// Create a configuration for high-precision simulation
    pub fn high_precision() -> Self {
        Self {
            timestep: 1.0 / 120.0,
            velocity_iterations: 8,
            ccd_enabled: true,
            ..Default::default()
        }
    }

    /// Create a configuration for fast simulation (lower quality)
    pub fn fast() -> Self {
        Self {
            timestep: 1.0 / 30.0,
            velocity_iterations: 2,
            ..Default::default()
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.gravity = [x, y, z];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }
}
