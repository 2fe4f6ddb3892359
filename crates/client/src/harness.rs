//! Headless harness for programmatic scene manipulation.
//!
//! Wraps a seeded [`SceneState`] so tests and agent scripts get reproducible
//! ids and placement.

use shared::{DrawPayload, SceneObject, Shape, Transform, ACCENT_COLOR};

use crate::fixtures::{math_payload, model_payload};
use crate::state::scene::SceneState;

/// Seed used by [`TestHarness::new`]
const HARNESS_SEED: u64 = 0x5eed;

pub struct TestHarness {
    pub scene: SceneState,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self::with_seed(HARNESS_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            scene: SceneState::seeded(seed),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add an object from a payload and return its ID
    pub fn add(&mut self, payload: &DrawPayload) -> String {
        self.scene.add_object(payload).id
    }

    /// Add a primitive and return its ID
    pub fn add_primitive(&mut self, shape: Shape, size: f64, color: Option<&str>) -> String {
        self.add(&math_payload(shape, size, color.unwrap_or(ACCENT_COLOR)))
    }

    pub fn add_box(&mut self, size: f64) -> String {
        self.add_primitive(Shape::Box, size, None)
    }

    pub fn add_sphere(&mut self, size: f64) -> String {
        self.add_primitive(Shape::Sphere, size, None)
    }

    pub fn add_model(&mut self, url: &str) -> String {
        self.add(&model_payload(url))
    }

    pub fn select(&mut self, id: Option<&str>) -> bool {
        self.scene.select(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.scene.selection().primary().map(String::as_str)
    }

    pub fn move_by(&mut self, id: &str, delta: [f64; 3]) -> bool {
        self.scene.translate(id, delta)
    }

    pub fn set_transform(&mut self, id: &str, transform: Transform) -> bool {
        self.scene.apply_transform(id, transform)
    }

    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        self.scene.duplicate(id).map(|o| o.id)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.scene.delete(id)
    }

    pub fn undo(&mut self) -> bool {
        self.scene.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.scene.redo()
    }

    pub fn clear(&mut self) {
        self.scene.clear();
    }

    /// Replace the scene from a JSON object list
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let objects: Vec<SceneObject> =
            serde_json::from_str(json).map_err(|e| format!("Invalid scene JSON: {e}"))?;
        self.scene.load_objects(objects);
        Ok(())
    }

    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(self.scene.objects()).unwrap_or_default()
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    pub fn position_of(&self, id: &str) -> Option<[f64; 3]> {
        self.scene.get(id).map(|o| o.transform.position)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
