//! Edit / Play / Pause state machine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scene states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneState {
    /// Authoring; transforms drive physics
    #[default]
    Edit,
    /// Simulating; physics drives transforms
    Play,
    /// Simulation frozen, single steps allowed
    Pause,
}

impl SceneState {
    pub fn name(&self) -> &'static str {
        match self {
            SceneState::Edit => "Edit",
            SceneState::Play => "Play",
            SceneState::Pause => "Pause",
        }
    }

    /// Play or Pause
    pub fn is_simulating(&self) -> bool {
        !matches!(self, SceneState::Edit)
    }

    /// Whether `self -> to` is a legal transition
    pub fn can_transition_to(&self, to: SceneState) -> bool {
        use SceneState::*;
        matches!(
            (self, to),
            (Edit, Play) | (Play, Pause) | (Pause, Play) | (Play, Edit) | (Pause, Edit)
        )
    }
}

impl fmt::Display for SceneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by [`SceneStateManager::on_state_changed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Listener called with `(old, new)` after every transition
pub type StateCallback = Box<dyn FnMut(SceneState, SceneState)>;

/// Tracks the scene state and notifies listeners of transitions.
///
/// Invalid requests return false and change nothing.
pub struct SceneStateManager {
    state: SceneState,
    frame_step_pending: bool,
    callbacks: Vec<(CallbackId, StateCallback)>,
    next_callback: u64,
}

impl Default for SceneStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStateManager")
            .field("state", &self.state)
            .field("frame_step_pending", &self.frame_step_pending)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl SceneStateManager {
    pub fn new() -> Self {
        Self {
            state: SceneState::Edit,
            frame_step_pending: false,
            callbacks: Vec::new(),
            next_callback: 1,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == SceneState::Edit
    }

    pub fn is_playing(&self) -> bool {
        self.state == SceneState::Play
    }

    pub fn is_paused(&self) -> bool {
        self.state == SceneState::Pause
    }

    /// Move to `to` if the transition is legal
    pub fn set_state(&mut self, to: SceneState) -> bool {
        let from = self.state;
        if !from.can_transition_to(to) {
            log::debug!("Rejected scene state transition {} -> {}", from, to);
            return false;
        }

        self.state = to;
        if to != SceneState::Pause {
            self.frame_step_pending = false;
        }
        log::info!("Scene state: {} -> {}", from, to);

        for (_, callback) in self.callbacks.iter_mut() {
            callback(from, to);
        }
        true
    }

    /// Edit -> Play or Pause -> Play
    pub fn play(&mut self) -> bool {
        self.set_state(SceneState::Play)
    }

    /// Play -> Pause
    pub fn pause(&mut self) -> bool {
        self.set_state(SceneState::Pause)
    }

    /// Play or Pause -> Edit
    pub fn stop(&mut self) -> bool {
        self.set_state(SceneState::Edit)
    }

    /// Request a single simulation step. Only valid while paused.
    pub fn frame_step(&mut self) -> bool {
        if self.state != SceneState::Pause {
            return false;
        }
        self.frame_step_pending = true;
        true
    }

    pub fn frame_step_pending(&self) -> bool {
        self.frame_step_pending
    }

    /// Consume a pending frame step
    pub fn take_frame_step(&mut self) -> bool {
        std::mem::take(&mut self.frame_step_pending)
    }

    /// Register a transition listener. Listeners run in registration order.
    pub fn on_state_changed(&mut self, callback: impl FnMut(SceneState, SceneState) + 'static) -> CallbackId {
        let id = CallbackId(self.next_callback);
        self.next_callback += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub fn remove_callback(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cid, _)| *cid != id);
        self.callbacks.len() != before
    }
}
