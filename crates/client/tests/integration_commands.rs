//! Integration tests for the agent command protocol and scene history.

use scene_client::command::{execute_json, execute_json_batch};
use scene_client::fixtures::*;
use scene_client::harness::TestHarness;
use shared::{SceneObject, Transform};

#[test]
fn test_batch_script() {
    let mut h = TestHarness::new();
    let responses = execute_json_batch(
        &mut h,
        r##"[
            {"command": "add_primitive", "shape": "sphere", "size": 4, "color": "#ff0000"},
            {"command": "duplicate"},
            {"command": "add_model", "url": "https://cdn/car.glb"},
            {"command": "inspect"}
        ]"##,
    )
    .unwrap();

    assert_eq!(responses.len(), 4);
    assert!(responses.iter().all(|r| r.success));
    let inspect = responses[3].data.as_ref().unwrap();
    assert_eq!(inspect["object_count"], 3);
    assert_eq!(inspect["objects"][1]["kind"]["color"], "#ff0000");
}

#[test]
fn test_batch_rejects_bad_entry() {
    let mut h = TestHarness::new();
    let result = execute_json_batch(&mut h, r#"[{"command": "undo"}, {"command": 7}]"#);
    assert!(result.is_err());
    assert_eq!(h.object_count(), 0);
}

#[test]
fn test_each_of_ten_mutations_undoes_exactly() {
    let mut h = TestHarness::new();
    let a = h.add_box(2.0);

    // record the collection before each of ten mixed mutations
    let mut before: Vec<Vec<SceneObject>> = Vec::new();
    for step in 0..10 {
        before.push(h.scene.objects().to_vec());
        match step % 5 {
            0 => {
                h.add_sphere(1.0);
            }
            1 => {
                h.move_by(&a, [1.0, 0.0, 0.0]);
            }
            2 => {
                h.duplicate(&a);
            }
            3 => {
                h.set_transform(&a, Transform::at([step as f64, 1.0, 0.0]));
            }
            _ => {
                let last = h.scene.objects().last().unwrap().id.clone();
                h.delete(&last);
            }
        }
    }

    for expected in before.iter().rev() {
        assert!(h.undo());
        assert_eq!(h.scene.objects(), expected.as_slice());
    }
    // the initial add fell out of the ten-step window
    assert!(!h.undo());
    assert_eq!(h.object_count(), 1);
}

#[test]
fn test_eleventh_prior_state_unrecoverable() {
    let mut h = TestHarness::new();
    for _ in 0..11 {
        h.add_box(1.0);
    }
    let mut undone = 0;
    while h.undo() {
        undone += 1;
    }
    assert_eq!(undone, 10);
    assert_eq!(h.object_count(), 1);
}

#[test]
fn test_delete_selected_then_transform_missing() {
    let mut h = TestHarness::new();
    let id = h.add_box(2.0);
    assert_eq!(h.selected(), Some(id.as_str()));

    let resp = execute_json(&mut h, &format!(r#"{{"command": "delete", "id": "{id}"}}"#)).unwrap();
    assert_eq!(resp.data.unwrap()["removed"], true);
    assert_eq!(h.selected(), None);

    let resp = execute_json(
        &mut h,
        &format!(r#"{{"command": "move", "id": "{id}", "delta": [1, 0, 0]}}"#),
    )
    .unwrap();
    assert_eq!(resp.data.unwrap()["changed"], false);
}

#[test]
fn test_duplicate_keeps_kind_and_offsets() {
    let mut h = TestHarness::new();
    let source = h.add_model("https://cdn/horse.glb");
    let clone = h.duplicate(&source).unwrap();

    let s = h.scene.get(&source).unwrap().clone();
    let c = h.scene.get(&clone).unwrap().clone();
    assert_ne!(s.id, c.id);
    assert_eq!(s.kind, c.kind);
    assert_ne!(s.transform.position, c.transform.position);
}

#[test]
fn test_load_scene_json_round() {
    let mut h = TestHarness::new();
    let objects = vec![
        primitive_object("a", [0.0, 1.0, 0.0]),
        asset_object("b", "https://cdn/fox.glb"),
    ];
    h.load_scene_json(&serde_json::to_string(&objects).unwrap())
        .unwrap();
    assert_eq!(h.object_count(), 2);
    assert_eq!(h.position_of("a"), Some([0.0, 1.0, 0.0]));
    assert!(h.load_scene_json("[{").is_err());
}
