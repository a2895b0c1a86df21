//! Command trait and the closed set of undoable actions.

use crate::error::CommandResult;
use crate::scene::Scene;

use super::entity_commands::{CreateAction, DeleteAction, ParentAction};
use super::transform_commands::TransformAction;

/// A reversible edit.
///
/// `redo` applies the edit (the first call performs it), `undo` reverts it.
/// Each action carries enough state to do both without outside help.
pub trait Command {
    /// Human-readable description for the undo/redo menu.
    fn description(&self) -> &str;

    /// Apply the edit.
    fn redo(&mut self, scene: &mut Scene) -> CommandResult;

    /// Revert the edit.
    fn undo(&mut self, scene: &mut Scene) -> CommandResult;
}

/// Every kind of entry the history can hold
#[derive(Debug)]
pub enum Action {
    Create(CreateAction),
    Delete(DeleteAction),
    Transform(TransformAction),
    Reparent(ParentAction),
    Group(ActionGroup),
}

impl Command for Action {
    fn description(&self) -> &str {
        match self {
            Action::Create(a) => a.description(),
            Action::Delete(a) => a.description(),
            Action::Transform(a) => a.description(),
            Action::Reparent(a) => a.description(),
            Action::Group(a) => a.description(),
        }
    }

    fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        match self {
            Action::Create(a) => a.redo(scene),
            Action::Delete(a) => a.redo(scene),
            Action::Transform(a) => a.redo(scene),
            Action::Reparent(a) => a.redo(scene),
            Action::Group(a) => a.redo(scene),
        }
    }

    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        match self {
            Action::Create(a) => a.undo(scene),
            Action::Delete(a) => a.undo(scene),
            Action::Transform(a) => a.undo(scene),
            Action::Reparent(a) => a.undo(scene),
            Action::Group(a) => a.undo(scene),
        }
    }
}

impl From<CreateAction> for Action {
    fn from(action: CreateAction) -> Self {
        Action::Create(action)
    }
}

impl From<DeleteAction> for Action {
    fn from(action: DeleteAction) -> Self {
        Action::Delete(action)
    }
}

impl From<TransformAction> for Action {
    fn from(action: TransformAction) -> Self {
        Action::Transform(action)
    }
}

impl From<ParentAction> for Action {
    fn from(action: ParentAction) -> Self {
        Action::Reparent(action)
    }
}

impl From<ActionGroup> for Action {
    fn from(action: ActionGroup) -> Self {
        Action::Group(action)
    }
}

/// Actions applied and reverted as one unit
#[derive(Debug)]
pub struct ActionGroup {
    name: String,
    actions: Vec<Action>,
}

impl ActionGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    pub fn with(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl Command for ActionGroup {
    fn description(&self) -> &str {
        &self.name
    }

    /// Apply every member in order. If one fails, the members already
    /// applied are reverted so the scene is left as it was.
    fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        for i in 0..self.actions.len() {
            if let Err(err) = self.actions[i].redo(scene) {
                for applied in self.actions[..i].iter_mut().rev() {
                    if let Err(revert) = applied.undo(scene) {
                        log::error!("Failed to revert '{}': {}", applied.description(), revert);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Revert every member in reverse order. If one fails, the members
    /// already reverted are re-applied so the group stays fully applied.
    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        let len = self.actions.len();
        for i in (0..len).rev() {
            if let Err(err) = self.actions[i].undo(scene) {
                for reverted in self.actions[i + 1..].iter_mut() {
                    if let Err(reapply) = reverted.redo(scene) {
                        log::error!("Failed to re-apply '{}': {}", reverted.description(), reapply);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
