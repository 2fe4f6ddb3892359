//! Scene state management
//!
//! This module owns the object collection, the selection, and a bounded
//! undo/redo history of collection snapshots.

mod history;
mod object_ops;
mod persistence;
mod transform_ops;

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::SceneObject;

use super::selection::SelectionState;
use super::settings::ClientSettings;
use transform_ops::Drag;

/// Object collection as stored in the history
pub type Snapshot = Vec<SceneObject>;

/// Scene objects with selection and undo/redo history
pub struct SceneState {
    objects: Vec<SceneObject>,
    selection: SelectionState,
    /// Undo stack - previous collections, oldest at the front
    pub(crate) undo_stack: VecDeque<Snapshot>,
    /// Redo stack - undone collections
    pub(crate) redo_stack: Vec<Snapshot>,
    /// Monotonically increasing version counter
    pub(crate) version: u64,
    rng: StdRng,
    settings: ClientSettings,
    drag: Option<Drag>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(ClientSettings::default(), StdRng::from_entropy())
    }
}

impl SceneState {
    pub fn new(settings: ClientSettings, rng: StdRng) -> Self {
        Self {
            objects: Vec::new(),
            selection: SelectionState::default(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            version: 0,
            rng,
            settings,
            drag: None,
        }
    }

    /// Default settings with a fixed seed (reproducible placement and ids)
    pub fn seeded(seed: u64) -> Self {
        Self::new(ClientSettings::default(), StdRng::seed_from_u64(seed))
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Get an object by ID
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get mutable object by ID
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Currently selected object, looked up live
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.get(self.selection.primary()?)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn history_depth(&self) -> usize {
        self.settings.history_depth.max(1)
    }

    /// Push a snapshot, evicting the oldest past the history depth.
    /// Any new mutation invalidates redo.
    pub(crate) fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.history_depth() {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Save current collection to undo stack
    pub(crate) fn save_undo(&mut self) {
        self.push_undo(self.objects.clone());
    }

    /// Selection must always refer to an existing object
    fn drop_dangling_selection(&mut self) {
        if let Some(id) = self.selection.primary() {
            if self.get(id).is_none() {
                self.selection.clear();
            }
        }
    }
}
