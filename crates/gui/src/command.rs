//! JSON command protocol for scripted sessions.
//!
//! Drives a [`TestHarness`] with the same actions the tool window offers,
//! plus the scene edits that would normally come from the modeling host.

use serde::{Deserialize, Serialize};
use shared::{DisplayMode, ElementRef, Mesh};

use crate::harness::TestHarness;
use crate::reconciler::{PassReport, Phase};

/// A command the agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add a mesh (replaces one with the same name)
    AddMesh {
        mesh: Mesh,
    },
    /// Replace the selection
    Select {
        elements: Vec<ElementRef>,
    },
    /// Clear selection.
    ClearSelection,
    /// Turn a display mode on or off
    Toggle {
        mode: DisplayMode,
        #[serde(default = "default_on")]
        on: bool,
    },
    /// Set label precision (clamped to 1-5)
    SetPrecision {
        digits: u8,
    },
    /// Re-run the enabled modes.
    Reload,
    /// Remove every annotation.
    DeleteAll,
    /// Undo the last geometry edit.
    Undo,
    /// Rename the live annotations
    Rename {
        name: String,
    },
    /// Move a whole mesh
    Translate {
        object: String,
        delta: [f64; 3],
    },
    /// Move one vertex to an absolute position
    MoveVertex {
        object: String,
        index: usize,
        position: [f64; 3],
    },
    /// Inspect the session: phase, meshes and live annotations.
    Inspect,
    /// Close the tool window.
    Close,
}

fn default_on() -> bool {
    true
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

    /// Summarize a pass, if one ran
    fn pass(report: Option<PassReport>) -> Self {
        match report {
            Some(report) => Self::ok_with_data(serde_json::json!({
                "retracted": report.retracted,
                "created": report.created(),
                "skipped": report.skipped(),
            })),
            None => Self::ok(),
        }
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Active => "active",
        Phase::Closed => "closed",
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddMesh { mesh } => CommandResponse::pass(harness.add_mesh(mesh)),

        AgentCommand::Select { elements } => {
            if let Some(missing) = elements.iter().find(|e| !harness.session.scene.resolves(e)) {
                return CommandResponse::err(format!("'{missing}' not found"));
            }
            CommandResponse::pass(harness.select_many(&elements))
        }

        AgentCommand::ClearSelection => CommandResponse::pass(harness.clear_selection()),

        AgentCommand::Toggle { mode, on } => CommandResponse::pass(harness.toggle(mode, on)),

        AgentCommand::SetPrecision { digits } => {
            CommandResponse::pass(harness.set_precision(digits))
        }

        AgentCommand::Reload => CommandResponse::pass(harness.reload()),

        AgentCommand::DeleteAll => CommandResponse::pass(harness.delete_all()),

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Rename { name } => {
            let before = harness.session.panel.advisories().len();
            harness.rename(&name);
            match harness.session.panel.advisories().get(before) {
                Some(advisory) => CommandResponse::err(advisory.to_string()),
                None => {
                    let names: Vec<&str> =
                        harness.annotations().iter().map(|a| a.name.as_str()).collect();
                    CommandResponse::ok_with_data(serde_json::json!({ "names": names }))
                }
            }
        }

        AgentCommand::Translate { object, delta } => match harness.translate(&object, delta) {
            Ok(report) => CommandResponse::pass(report),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::MoveVertex {
            object,
            index,
            position,
        } => match harness.move_vertex(&object, index, position) {
            Ok(report) => CommandResponse::pass(report),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Inspect => {
            let meshes: Vec<serde_json::Value> = harness
                .session
                .scene
                .meshes()
                .iter()
                .map(|mesh| {
                    serde_json::json!({
                        "name": mesh.name,
                        "vertex_count": mesh.vertices.len(),
                        "face_count": mesh.faces.len(),
                    })
                })
                .collect();
            let annotations: Vec<serde_json::Value> = harness
                .annotations()
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "name": a.name,
                        "owner": a.owner.to_string(),
                        "anchor": a.anchor,
                        "label": a.label,
                    })
                })
                .collect();
            let selection: Vec<String> = harness
                .session
                .scene
                .selection_state()
                .all()
                .iter()
                .map(|e| e.to_string())
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "phase": phase_name(harness.phase()),
                "precision": harness.session.reconciler.precision().digits(),
                "selection": selection,
                "mesh_count": meshes.len(),
                "meshes": meshes,
                "annotation_count": annotations.len(),
                "annotations": annotations,
            }))
        }

        AgentCommand::Close => CommandResponse::pass(harness.close()),
    }
}

/// Parse and execute a single JSON command string.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_toggle_defaults_on() {
        let json = r#"{"command": "toggle", "mode": "face_only"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::Toggle { mode, on } => {
                assert_eq!(mode, DisplayMode::FaceOnly);
                assert!(on);
            }
            _ => panic!("Expected Toggle"),
        }
    }

    #[test]
    fn test_command_serde_select() {
        let json = r#"{"command": "select", "elements": [{"type": "face", "object": "cube", "index": 2}]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::Select { elements } => {
                assert_eq!(elements, vec![ElementRef::face("cube", 2)])
            }
            _ => panic!("Expected Select"),
        }
    }

    #[test]
    fn test_execute_select_unknown_element() {
        let mut h = TestHarness::with_meshes(vec![fixtures::unit_cube("cube")]);
        let json = r#"{"command": "select", "elements": [{"type": "vertex", "object": "cube", "index": 99}]}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("cube.vtx[99]"));
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::with_meshes(vec![fixtures::unit_cube("cube")]);
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["mesh_count"], 1);
        assert_eq!(data["phase"], "idle");
        assert_eq!(data["precision"], 2);
    }

    #[test]
    fn test_execute_rename_collision_is_error() {
        let mut h = TestHarness::with_meshes(vec![fixtures::unit_cube("cube")]);
        h.select(ElementRef::vertex("cube", 0));
        h.toggle(DisplayMode::VertexOnly, true);
        let resp = execute_json(&mut h, r#"{"command": "rename", "name": "cube"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("already taken"));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
