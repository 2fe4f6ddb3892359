//! JSON command protocol for scripted scene editing.

use serde::{Deserialize, Serialize};
use shared::{Shape, Transform, DEFAULT_SIZE};

use crate::harness::TestHarness;

fn default_size() -> f64 {
    DEFAULT_SIZE
}

/// A command an agent can execute against the scene.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add a primitive at a random ground position
    AddPrimitive {
        shape: Shape,
        #[serde(default = "default_size")]
        size: f64,
        #[serde(default)]
        color: Option<String>,
    },
    /// Add a fetched model by URL
    AddModel { url: String },
    /// Select an object, or clear the selection with `null`.
    Select { id: Option<String> },
    /// Commit a full transform.
    SetTransform { id: String, transform: Transform },
    /// Move an object by a delta.
    Move { id: String, delta: [f64; 3] },
    /// Duplicate an object, or the selection when `id` is omitted.
    Duplicate {
        #[serde(default)]
        id: Option<String>,
    },
    /// Delete an object by ID
    Delete { id: String },
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Clear the entire scene.
    Clear,
    /// Inspect the scene: list all objects.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddPrimitive { shape, size, color } => {
            let id = harness.add_primitive(shape, size, color.as_deref());
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::AddModel { url } => {
            let id = harness.add_model(&url);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::Select { id } => {
            if harness.select(id.as_deref()) {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
            } else {
                CommandResponse::err(format!("Unknown object: {}", id.unwrap_or_default()))
            }
        }

        AgentCommand::SetTransform { id, transform } => {
            let changed = harness.set_transform(&id, transform);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::Move { id, delta } => {
            let changed = harness.move_by(&id, delta);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        AgentCommand::Duplicate { id } => {
            let clone = match id {
                Some(id) => harness.duplicate(&id),
                None => harness.scene.duplicate_selected().map(|o| o.id),
            };
            match clone {
                Some(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
                None => CommandResponse::err("Nothing to duplicate"),
            }
        }

        AgentCommand::Delete { id } => {
            let removed = harness.delete(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = harness
                .scene
                .objects()
                .iter()
                .map(|object| {
                    serde_json::json!({
                        "id": object.id,
                        "kind": object.kind,
                        "position": object.transform.position,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "selected": harness.selected(),
                "can_undo": harness.scene.can_undo(),
                "can_redo": harness.scene.can_redo(),
            }))
        }

        AgentCommand::ExportScene => CommandResponse::ok_with_data(serde_json::json!({
            "scene_json": harness.export_scene_json(),
        })),
    }
}

/// Parse and execute a JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
