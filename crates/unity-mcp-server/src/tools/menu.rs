//! `execute_menu_item`: run editor menu commands by path

use super::{Messages, ToolDef, forward, null_as_default, parse_args};
use crate::backend::EditorBackend;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "execute_menu_item";

const MESSAGES: Messages = Messages {
    success: "Menu item executed successfully.",
    failure: "An unknown error occurred during menu item execution.",
};

/// Arguments for execute_menu_item
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ExecuteMenuItemArgs {
    pub menu_path: String,
    #[serde(default = "default_action", deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Map<String, Value>,
}

fn default_action() -> String {
    "execute".to_string()
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Executes a Unity Editor menu item by its path, e.g. \"File/Save Project\" or \"GameObject/3D Object/Cube\".".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "menu_path": {
                    "type": "string",
                    "description": "Full menu path. Example: \"File/Save Project\""
                },
                "action": {
                    "type": "string",
                    "description": "Operation: execute (default), get_available_menus",
                    "default": "execute"
                },
                "parameters": {
                    "type": "object",
                    "description": "Optional parameters for the menu item"
                }
            },
            "required": ["menu_path"]
        }),
    }
}

pub async fn run<B: EditorBackend>(
    arguments: Value,
    backend: &Arc<Mutex<B>>,
) -> Result<ToolOutcome> {
    let mut args: ExecuteMenuItemArgs = parse_args(arguments)?;
    args.action = if args.action.is_empty() {
        default_action()
    } else {
        args.action.to_lowercase()
    };
    forward(backend, NAME, &args, MESSAGES).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults() {
        let backend = RecordingBackend::replying(vec![]);
        let outcome = run(json!({"menu_path": "File/Save Project"}), &backend)
            .await
            .unwrap();
        assert_eq!(outcome.message, "Menu item executed successfully.");

        let guard = backend.lock().await;
        let sent = &guard.sent;
        assert_eq!(sent[0].0, "execute_menu_item");
        assert_eq!(
            sent[0].1,
            json!({"menuPath": "File/Save Project", "action": "execute", "parameters": {}})
        );
    }

    #[tokio::test]
    async fn test_action_is_lowercased() {
        let backend = RecordingBackend::replying(vec![]);
        run(
            json!({"menu_path": "Edit/Play", "action": "EXECUTE", "parameters": {"force": true}}),
            &backend,
        )
        .await
        .unwrap();

        let guard = backend.lock().await;
        let sent = &guard.sent;
        assert_eq!(sent[0].1["action"], "execute");
        assert_eq!(sent[0].1["parameters"]["force"], true);
    }

    #[tokio::test]
    async fn test_null_action_falls_back_to_execute() {
        let backend = RecordingBackend::replying(vec![]);
        run(
            json!({"menu_path": "Assets/Refresh", "action": null, "parameters": null}),
            &backend,
        )
        .await
        .unwrap();

        let guard = backend.lock().await;
        let sent = &guard.sent;
        assert_eq!(sent[0].1["action"], "execute");
        assert_eq!(sent[0].1["parameters"], json!({}));
    }
}
