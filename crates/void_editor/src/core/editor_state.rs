//! Central editor state.
//!
//! Owns the scene, the undo history and the play-mode state machine, and
//! ties them together: entering Play snapshots the scene and hands transform
//! ownership to physics, returning to Edit restores the snapshot.

use crate::commands::{Action, Command};
use crate::core::{EditorConfig, SceneState, SceneStateManager, UndoRedoSystem};
use crate::error::{CommandResult, EditorError};
use crate::scene::{Scene, SceneSnapshot, SyncDirection};

/// Editor context
#[derive(Debug)]
pub struct EditorState {
    pub scene: Scene,
    pub history: UndoRedoSystem,
    pub play_state: SceneStateManager,
    snapshot: Option<SceneSnapshot>,
    config: EditorConfig,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let scene = Scene::new(config.physics.clone()).with_default_physics(config.default_physics);
        Self {
            scene,
            history: UndoRedoSystem::with_capacity(config.history_limit),
            play_state: SceneStateManager::new(),
            snapshot: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> SceneState {
        self.play_state.state()
    }

    /// Snapshot taken on the last entry into Play, while simulating
    pub fn snapshot(&self) -> Option<&SceneSnapshot> {
        self.snapshot.as_ref()
    }

    // ========================================================================
    // History
    // ========================================================================

    // History is edit-time only: Stop discards everything done while simulating.

    /// Apply an action and record it for undo. Refused while simulating.
    pub fn execute(&mut self, action: impl Into<Action>) -> CommandResult {
        let action = action.into();
        if self.play_state.state().is_simulating() {
            return Err(EditorError::InvalidOperation(format!(
                "Cannot {} in {} mode",
                action.description(),
                self.play_state.state()
            )));
        }
        self.history.execute_action(action, &mut self.scene)
    }

    /// Record an already-applied action. Dropped while simulating.
    pub fn record(&mut self, action: impl Into<Action>) {
        let action = action.into();
        if self.play_state.state().is_simulating() {
            log::warn!("Not recording '{}' during {}", action.description(), self.play_state.state());
            return;
        }
        self.history.record_action(action);
    }

    pub fn undo(&mut self) -> bool {
        if self.play_state.state().is_simulating() {
            log::warn!("Undo is unavailable during {}", self.play_state.state());
            return false;
        }
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        if self.play_state.state().is_simulating() {
            log::warn!("Redo is unavailable during {}", self.play_state.state());
            return false;
        }
        self.history.redo(&mut self.scene)
    }

    // ========================================================================
    // Play mode
    // ========================================================================

    /// Enter Play from Edit (taking a snapshot) or resume from Pause
    pub fn play(&mut self) -> bool {
        let entering = self.play_state.is_editing();
        if entering {
            self.snapshot = Some(self.scene.capture_snapshot());
        }
        if !self.play_state.play() {
            if entering {
                self.snapshot = None;
            }
            return false;
        }

        let physics = self.scene.physics_mut();
        physics.set_direction(SyncDirection::PhysicsToEcs);
        if entering {
            physics.reset_accumulator();
            log::info!(
                "Entered play mode ({} objects snapshotted)",
                self.snapshot.as_ref().map_or(0, |s| s.len())
            );
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        self.play_state.pause()
    }

    /// Return to Edit and roll the scene back to the snapshot
    pub fn stop(&mut self) -> bool {
        if !self.play_state.stop() {
            return false;
        }

        let physics = self.scene.physics_mut();
        physics.set_direction(SyncDirection::EcsToPhysics);
        physics.reset_accumulator();

        match self.snapshot.take() {
            Some(snapshot) => {
                self.scene.restore_snapshot(&snapshot);
            }
            None => log::warn!("Stopped play mode without a snapshot"),
        }
        true
    }

    /// Request one simulation step while paused
    pub fn frame_step(&mut self) -> bool {
        self.play_state.frame_step()
    }

    /// Advance by frame time `dt`. Returns the number of physics steps run.
    pub fn update(&mut self, dt: f32) -> usize {
        match self.play_state.state() {
            SceneState::Edit => 0,
            SceneState::Play => self.scene.step_simulation(dt),
            SceneState::Pause => {
                if self.play_state.take_frame_step() && self.scene.step_once() {
                    1
                } else {
                    0
                }
            }
        }
    }
}
