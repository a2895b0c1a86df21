//! Undo/Redo history with transaction support.
//!
//! Edits go through [`UndoRedoSystem::execute_action`], or through
//! [`UndoRedoSystem::record_action`] when the change was already applied
//! (for example at the end of a drag). Actions can be grouped into
//! transactions that undo as one step.

use crate::commands::{Action, ActionGroup, Command};
use crate::error::CommandResult;
use crate::scene::Scene;

/// Undo/redo stacks
#[derive(Debug)]
pub struct UndoRedoSystem {
    /// Actions that can be undone
    undo_stack: Vec<Action>,
    /// Actions that can be redone
    redo_stack: Vec<Action>,
    /// Maximum undo depth
    max_size: usize,
    /// Current open transaction
    current_transaction: Option<ActionGroup>,
    /// Whether history has changed since the last save
    dirty: bool,
}

impl Default for UndoRedoSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoRedoSystem {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            current_transaction: None,
            dirty: false,
        }
    }

    /// Apply an action and record it.
    ///
    /// A failing action is logged and not recorded.
    pub fn execute_action(&mut self, mut action: Action, scene: &mut Scene) -> CommandResult {
        if let Err(err) = action.redo(scene) {
            log::error!("{} failed: {}", action.description(), err);
            return Err(err);
        }
        log::debug!("Executed {}", action.description());
        self.record_action(action);
        Ok(())
    }

    /// Record an action whose effect is already applied.
    pub fn record_action(&mut self, action: Action) {
        match self.current_transaction {
            Some(ref mut transaction) => transaction.push(action),
            None => self.push_action(action),
        }
    }

    fn push_action(&mut self, action: Action) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
        self.dirty = true;
        self.trim();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Undo the most recent action. Returns false if there was nothing to
    /// undo or the action failed; a failed action stays on the undo stack.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut action) = self.undo_stack.pop() else {
            return false;
        };
        match action.undo(scene) {
            Ok(()) => {
                log::info!("Undo: {}", action.description());
                self.redo_stack.push(action);
                self.dirty = true;
                true
            }
            Err(err) => {
                log::error!("Undo of {} failed: {}", action.description(), err);
                self.undo_stack.push(action);
                false
            }
        }
    }

    /// Redo the most recently undone action.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut action) = self.redo_stack.pop() else {
            return false;
        };
        match action.redo(scene) {
            Ok(()) => {
                log::info!("Redo: {}", action.description());
                self.undo_stack.push(action);
                self.dirty = true;
                true
            }
            Err(err) => {
                log::error!("Redo of {} failed: {}", action.description(), err);
                self.redo_stack.push(action);
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the next undo action.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|a| a.description())
    }

    /// Description of the next redo action.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|a| a.description())
    }

    /// Undo descriptions, most recent first
    pub fn undo_descriptions(&self) -> Vec<&str> {
        self.undo_stack.iter().rev().map(|a| a.description()).collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as saved (clears dirty flag).
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Begin a transaction. Actions executed or recorded until the commit
    /// become one undo step.
    pub fn begin_transaction(&mut self, name: impl Into<String>) {
        if let Some(open) = self.current_transaction.take() {
            log::warn!("Beginning transaction while '{}' is open; committing it", open.description());
            if !open.is_empty() {
                self.push_action(Action::Group(open));
            }
        }
        self.current_transaction = Some(ActionGroup::new(name));
    }

    /// Commit the current transaction.
    pub fn commit_transaction(&mut self) {
        if let Some(transaction) = self.current_transaction.take() {
            if !transaction.is_empty() {
                self.push_action(Action::Group(transaction));
            }
        }
    }

    /// Discard the current transaction, reverting what it applied.
    pub fn rollback_transaction(&mut self, scene: &mut Scene) -> CommandResult {
        match self.current_transaction.take() {
            Some(mut transaction) => transaction.undo(scene),
            None => Ok(()),
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.current_transaction.is_some()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_transaction = None;
        self.dirty = false;
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the undo depth, dropping the oldest entries if needed
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.trim();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CreateAction, TransformAction};
    use crate::scene::ObjectKind;
    use glam::Vec3;

    fn moved(scene: &Scene, e: void_ecs::Entity, x: f32) -> Action {
        TransformAction::moved(scene, e, Vec3::new(x, 0.0, 0.0))
            .map(Action::from)
            .unwrap()
    }

    #[test]
    fn test_history_basic() {
        let mut scene = Scene::default();
        let mut history = UndoRedoSystem::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        history
            .execute_action(CreateAction::new("A", ObjectKind::Empty).into(), &mut scene)
            .unwrap();
        assert!(history.can_undo());
        assert_eq!(history.undo_description(), Some("Create Object"));
        assert!(history.is_dirty());
    }

    #[test]
    fn test_empty_undo_redo_are_noops() {
        let mut scene = Scene::default();
        let mut history = UndoRedoSystem::new();
        assert!(!history.undo(&mut scene));
        assert!(!history.redo(&mut scene));
    }

    #[test]
    fn test_new_action_clears_redo() {
        let mut scene = Scene::default();
        let e = scene.create_object("A", ObjectKind::Empty);
        let mut history = UndoRedoSystem::new();

        let first = moved(&scene, e, 1.0);
        history.execute_action(first, &mut scene).unwrap();
        history.undo(&mut scene);
        assert_eq!(history.redo_count(), 1);

        let second = moved(&scene, e, 2.0);
        history.execute_action(second, &mut scene).unwrap();
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_trim_drops_oldest() {
        let mut scene = Scene::default();
        let e = scene.create_object("A", ObjectKind::Empty);
        let mut history = UndoRedoSystem::with_capacity(3);

        for i in 1..=5 {
            let action = moved(&scene, e, i as f32);
            history.execute_action(action, &mut scene).unwrap();
        }
        assert_eq!(history.undo_count(), 3);

        while history.undo(&mut scene) {}
        // Oldest two entries were dropped, so x stops at the value set by the second move
        assert_eq!(scene.position(e), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_record_does_not_apply() {
        let mut scene = Scene::default();
        let e = scene.create_object("A", ObjectKind::Empty);
        let mut history = UndoRedoSystem::new();

        let action = moved(&scene, e, 4.0);
        history.record_action(action);
        assert_eq!(scene.position(e), Some(Vec3::ZERO));
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_transaction_undoes_as_one() {
        let mut scene = Scene::default();
        let mut history = UndoRedoSystem::new();

        history.begin_transaction("Spawn Pair");
        history
            .execute_action(CreateAction::new("A", ObjectKind::Empty).into(), &mut scene)
            .unwrap();
        history
            .execute_action(CreateAction::new("B", ObjectKind::Empty).into(), &mut scene)
            .unwrap();
        assert_eq!(history.undo_count(), 0);
        history.commit_transaction();

        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo_description(), Some("Spawn Pair"));
        assert!(history.undo(&mut scene));
        assert!(scene.is_empty());
        assert!(history.redo(&mut scene));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_rollback_reverts_applied_actions() {
        let mut scene = Scene::default();
        let mut history = UndoRedoSystem::new();

        history.begin_transaction("Discarded");
        history
            .execute_action(CreateAction::new("A", ObjectKind::Empty).into(), &mut scene)
            .unwrap();
        history.rollback_transaction(&mut scene).unwrap();

        assert!(scene.is_empty());
        assert!(!history.in_transaction());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_set_max_size_trims() {
        let mut scene = Scene::default();
        let e = scene.create_object("A", ObjectKind::Empty);
        let mut history = UndoRedoSystem::new();
        for i in 0..10 {
            let action = moved(&scene, e, i as f32);
            history.execute_action(action, &mut scene).unwrap();
        }
        history.set_max_size(4);
        assert_eq!(history.undo_count(), 4);
        assert_eq!(history.max_size(), 4);
    }
}
