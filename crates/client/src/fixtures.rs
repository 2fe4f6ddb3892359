//! Factory functions for creating test data.
//!
//! Helpers to construct draw payloads, scene objects and blueprint rooms used
//! in tests and by the agent command interface.

use shared::*;

// ── Payload factories ───────────────────────────────────────────

/// Primitive payload as the server sends it
pub fn math_payload(shape: Shape, size: f64, color: &str) -> DrawPayload {
    DrawPayload::Math {
        params: PrimitiveParams::new(shape, size, color),
    }
}

/// Accent-colored box payload
pub fn box_payload(size: f64) -> DrawPayload {
    math_payload(Shape::Box, size, ACCENT_COLOR)
}

/// Fetched-model payload
pub fn model_payload(url: &str) -> DrawPayload {
    DrawPayload::Model {
        url: url.to_string(),
    }
}

// ── Object factories ────────────────────────────────────────────

/// 2x2 accent box with a fixed id at `position`
pub fn primitive_object(id: &str, position: [f64; 3]) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        kind: ObjectKind::Primitive(PrimitiveParams::fallback()),
        transform: Transform::at(position),
    }
}

/// Asset object with a fixed id at the origin
pub fn asset_object(id: &str, url: &str) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        kind: ObjectKind::Asset {
            source_url: url.to_string(),
        },
        transform: Transform::new(),
    }
}

// ── Blueprint factories ─────────────────────────────────────────

/// Closed axis-aligned room outline
pub fn square_room(min: (f64, f64), max: (f64, f64)) -> Polygon {
    vec![
        Point2D::new(min.0, min.1),
        Point2D::new(max.0, min.1),
        Point2D::new(max.0, max.1),
        Point2D::new(min.0, max.1),
        Point2D::new(min.0, min.1),
    ]
}

/// Stored project with the given objects and one 10x10 room
pub fn project_record(id: &str, name: &str, objects: Vec<SceneObject>) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        name: name.to_string(),
        nodes: vec![square_room((-5.0, -5.0), (5.0, 5.0))],
        objects,
    }
}
