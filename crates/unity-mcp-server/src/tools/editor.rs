//! `manage_editor`: play mode, editor state, tags and layers

use super::{Messages, ToolDef, forward, parse_args};
use crate::backend::EditorBackend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "manage_editor";

const MESSAGES: Messages = Messages {
    success: "Editor operation successful.",
    failure: "An unknown error occurred during editor management.",
};

/// Arguments for manage_editor
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ManageEditorArgs {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_completion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Controls and queries the Unity editor's state: enter/pause/exit play mode, read editor state, windows, active tool and selection, and manage tags and layers.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "Operation to perform",
                    "enum": [
                        "play", "pause", "stop",
                        "get_state", "get_windows", "get_active_tool", "get_selection",
                        "set_active_tool",
                        "add_tag", "remove_tag", "get_tags",
                        "add_layer", "remove_layer", "get_layers"
                    ]
                },
                "wait_for_completion": {
                    "type": "boolean",
                    "description": "Wait for the operation to finish (e.g. play mode transitions)"
                },
                "tool_name": {
                    "type": "string",
                    "description": "Tool name for set_active_tool (e.g. \"Move\", \"Rotate\")"
                },
                "tag_name": {
                    "type": "string",
                    "description": "Tag name for add_tag/remove_tag"
                },
                "layer_name": {
                    "type": "string",
                    "description": "Layer name for add_layer/remove_layer"
                }
            },
            "required": ["action"]
        }),
    }
}

pub async fn run<B: EditorBackend>(
    arguments: serde_json::Value,
    backend: &Arc<Mutex<B>>,
) -> Result<ToolOutcome> {
    let args: ManageEditorArgs = parse_args(arguments)?;
    forward(backend, NAME, &args, MESSAGES).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_optional_fields_are_omitted() {
        let backend = RecordingBackend::replying(vec![Ok(json!({
            "success": true,
            "data": {"isPlaying": true, "isPaused": false}
        }))]);

        let outcome = run(json!({"action": "get_state"}), &backend).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "Editor operation successful.");
        assert_eq!(outcome.data.unwrap()["isPlaying"], true);

        let guard = backend.lock().await;
        let sent = &guard.sent;
        assert_eq!(sent[0].0, "manage_editor");
        assert_eq!(sent[0].1, json!({"action": "get_state"}));
    }

    #[tokio::test]
    async fn test_camel_case_params() {
        let backend = RecordingBackend::replying(vec![]);
        run(
            json!({"action": "add_tag", "tag_name": "Enemy", "wait_for_completion": true}),
            &backend,
        )
        .await
        .unwrap();

        let guard = backend.lock().await;
        let sent = &guard.sent;
        assert_eq!(
            sent[0].1,
            json!({"action": "add_tag", "tagName": "Enemy", "waitForCompletion": true})
        );
    }

    #[tokio::test]
    async fn test_editor_failure_message() {
        let backend = RecordingBackend::replying(vec![Ok(json!({
            "success": false,
            "error": "Tag 'Enemy' already exists."
        }))]);
        let outcome = run(json!({"action": "add_tag", "tag_name": "Enemy"}), &backend)
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Tag 'Enemy' already exists.");
    }
}
