//! Transform/drag operations
//!
//! A drag previews transforms live without touching history. The snapshot is
//! taken when the drag ends, from the collection as it is at that moment with
//! only the dragged object put back where it started, so objects inserted
//! during the drag survive an undo of the drag.

use glam::DVec3;
use shared::{ObjectId, Transform};

use super::SceneState;

/// In-progress drag
pub(super) struct Drag {
    pub(super) id: ObjectId,
    origin: Transform,
}

impl SceneState {
    /// Commit a final transform; no-op for unknown ids
    pub fn apply_transform(&mut self, id: &str, transform: Transform) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        if self.objects[index].transform == transform {
            return false;
        }
        self.save_undo();
        self.objects[index].transform = transform;
        self.version += 1;
        true
    }

    /// Move an object by a delta
    pub fn translate(&mut self, id: &str, delta: [f64; 3]) -> bool {
        let Some(object) = self.get(id) else {
            return false;
        };
        let position = DVec3::from_array(object.transform.position) + DVec3::from_array(delta);
        let transform = Transform {
            position: position.to_array(),
            ..object.transform.clone()
        };
        self.apply_transform(id, transform)
    }

    /// Start dragging an object; remembers its transform for the undo snapshot
    pub fn begin_drag(&mut self, id: &str) -> bool {
        let Some(object) = self.get(id) else {
            return false;
        };
        self.drag = Some(Drag {
            id: object.id.clone(),
            origin: object.transform.clone(),
        });
        true
    }

    /// Live preview of the dragged object's transform
    pub fn drag_update(&mut self, transform: Transform) {
        let Some(id) = self.drag.as_ref().map(|d| d.id.clone()) else {
            return;
        };
        if let Some(object) = self.get_mut(&id) {
            object.transform = transform;
            self.version += 1;
        }
    }

    /// Finish the drag, recording one undo step if the object moved
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let Some(index) = self.objects.iter().position(|o| o.id == drag.id) else {
            return false;
        };
        if self.objects[index].transform == drag.origin {
            return false;
        }

        let mut snapshot = self.objects.clone();
        snapshot[index].transform = drag.origin;
        self.push_undo(snapshot);
        self.version += 1;
        true
    }

    /// Abort the drag and put the object back
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            if let Some(object) = self.get_mut(&drag.id) {
                object.transform = drag.origin;
                self.version += 1;
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
