//! Core editor state: context, history, play mode and configuration.

mod config;
mod editor_state;
mod history;
mod play_state;

pub use config::EditorConfig;
pub use editor_state::EditorState;
pub use history::UndoRedoSystem;
pub use play_state::{CallbackId, SceneState, SceneStateManager, StateCallback};
