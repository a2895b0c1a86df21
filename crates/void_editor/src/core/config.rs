//! Editor configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use void_physics::PhysicsConfig;

use crate::components::PhysicsSettings;
use crate::core::UndoRedoSystem;
use crate::error::ConfigError;

/// Editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo depth
    pub history_limit: usize,
    /// Physics world settings
    pub physics: PhysicsConfig,
    /// Settings used when physics is enabled on an object without any
    pub default_physics: PhysicsSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: UndoRedoSystem::DEFAULT_MAX_SIZE,
            physics: PhysicsConfig::default(),
            default_physics: PhysicsSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded editor config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("Saved editor config to {:?}", path);
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default config path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("void_editor");
            p.push("editor.toml");
            p
        })
    }
}
