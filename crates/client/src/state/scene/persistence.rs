//! Scene file save/load

use std::path::Path;

use shared::SceneObject;

use super::SceneState;

impl SceneState {
    /// Write the collection to `path`
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.objects)?;
        std::fs::write(path, json)
    }

    /// Read a collection written by [`SceneState::save_to`]
    pub fn load_from(path: &Path) -> Option<Vec<SceneObject>> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(objects) => Some(objects),
            Err(e) => {
                tracing::warn!("Ignoring unreadable scene file {}: {e}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use crate::state::scene::SceneState;

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");

        let mut scene = SceneState::seeded(5);
        scene.add_object(&box_payload(2.0));
        scene.add_object(&model_payload("https://cdn/lamp.glb"));
        scene.save_to(&path).unwrap();

        assert_eq!(SceneState::load_from(&path).unwrap(), scene.objects());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SceneState::load_from(&path).is_none());
        assert!(SceneState::load_from(&dir.path().join("missing.json")).is_none());
    }
}
