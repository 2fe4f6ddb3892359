//! Object insertion, selection, duplication and removal

use glam::DVec3;
use rand::Rng;
use shared::{DrawPayload, ObjectId, SceneObject, Transform};

use super::SceneState;

impl SceneState {
    /// Fresh object id drawn from the scene's rng
    fn next_id(&mut self) -> ObjectId {
        uuid::Builder::from_random_bytes(self.rng.gen())
            .into_uuid()
            .to_string()
    }

    /// Insert an object at a random spot on the ground plane and select it
    pub fn add_object(&mut self, payload: &DrawPayload) -> SceneObject {
        self.save_undo();

        let half = self.settings.placement_spread.abs() / 2.0;
        let x = self.rng.gen_range(-half..=half);
        let z = self.rng.gen_range(-half..=half);
        let kind = payload.to_kind();
        let y = kind.rest_height() / 2.0;

        let object = SceneObject {
            id: self.next_id(),
            kind,
            transform: Transform::at([x, y, z]),
        };
        self.objects.push(object.clone());
        self.selection.select(object.id.clone());
        self.version += 1;
        tracing::debug!(id = %object.id, "Object added");
        object
    }

    /// Select an object, or clear with `None`. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selection.clear();
                true
            }
            Some(id) if self.get(id).is_some() => {
                self.selection.select(id.to_string());
                true
            }
            Some(id) => {
                tracing::debug!(id, "Ignoring selection of unknown object");
                false
            }
        }
    }

    /// Clone an object with a new id at a fixed offset and select the clone
    pub fn duplicate(&mut self, id: &str) -> Option<SceneObject> {
        let source = self.get(id)?.clone();
        self.save_undo();

        let position = DVec3::from_array(source.transform.position)
            + DVec3::from_array(self.settings.duplicate_offset);
        let clone = SceneObject {
            id: self.next_id(),
            kind: source.kind,
            transform: Transform {
                position: position.to_array(),
                ..source.transform
            },
        };
        self.objects.push(clone.clone());
        self.selection.select(clone.id.clone());
        self.version += 1;
        Some(clone)
    }

    /// Duplicate the selected object
    pub fn duplicate_selected(&mut self) -> Option<SceneObject> {
        let id = self.selection.primary()?.clone();
        self.duplicate(&id)
    }

    /// Remove an object; unknown ids are a no-op
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        self.save_undo();
        self.objects.remove(index);
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        if self.drag.as_ref().is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        self.version += 1;
        true
    }

    /// Remove every object
    pub fn clear(&mut self) {
        self.save_undo();
        self.objects.clear();
        self.selection.clear();
        self.drag = None;
        self.version += 1;
    }

    /// Replace the collection, e.g. with a loaded project
    pub fn load_objects(&mut self, objects: Vec<SceneObject>) {
        self.save_undo();
        self.objects = objects;
        self.selection.clear();
        self.drag = None;
        self.version += 1;
    }
}
