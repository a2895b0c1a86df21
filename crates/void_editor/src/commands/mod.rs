//! Undoable actions.
//!
//! Every edit that should be undoable goes through the history as one of
//! the [`Action`] variants.

mod command;
mod entity_commands;
mod transform_commands;

pub use command::{Action, ActionGroup, Command};
pub use entity_commands::{CreateAction, DeleteAction, ParentAction};
pub use transform_commands::TransformAction;

pub use crate::error::{CommandResult, EditorError};
