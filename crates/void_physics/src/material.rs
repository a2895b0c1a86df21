//! Physics materials defining surface properties

use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Physics material defining friction and restitution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Friction coefficient (0 = frictionless)
    pub friction: f32,
    /// Restitution/bounciness (0 = no bounce, 1 = perfect bounce)
    pub restitution: f32,
    /// Density used when no explicit mass is given (kg/m³)
    pub density: f32,
    /// How friction is combined between two colliders
    #[serde(default)]
    pub friction_combine: CombineRule,
    /// How restitution is combined between two colliders
    #[serde(default)]
    pub restitution_combine: CombineRule,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            friction_combine: CombineRule::Average,
            restitution_combine: CombineRule::Average,
        }
    }
}

impl PhysicsMaterial {
    /// Create a new physics material
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction,
            restitution,
            ..Default::default()
        }
    }

    /// Set friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.max(0.0);
        self
    }

    /// Set restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set density
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density.max(0.001);
        self
    }
}

/// Rule for combining material properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombineRule {
    /// Use the average of both values
    #[default]
    Average,
    /// Use the minimum value
    Min,
    /// Use the maximum value
    Max,
    /// Multiply the values
    Multiply,
}

impl From<CombineRule> for rapier::CoefficientCombineRule {
    fn from(rule: CombineRule) -> Self {
        match rule {
            CombineRule::Average => rapier::CoefficientCombineRule::Average,
            CombineRule::Min => rapier::CoefficientCombineRule::Min,
            CombineRule::Max => rapier::CoefficientCombineRule::Max,
            CombineRule::Multiply => rapier::CoefficientCombineRule::Multiply,
        }
    }
}
