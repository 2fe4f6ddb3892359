//! Undo/redo functionality

use super::SceneState;

impl SceneState {
    /// Undo last change; `false` when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.objects, prev);
        self.redo_stack.push(current);
        if self.redo_stack.len() > self.history_depth() {
            self.redo_stack.remove(0);
        }
        self.drag = None;
        self.drop_dangling_selection();
        self.version += 1;
        true
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.objects, next);
        self.undo_stack.push_back(current);
        if self.undo_stack.len() > self.history_depth() {
            self.undo_stack.pop_front();
        }
        self.drag = None;
        self.drop_dangling_selection();
        self.version += 1;
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps available
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}
