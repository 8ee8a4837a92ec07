//! MCP tool handlers for the Unity Editor
//!
//! Every tool follows the same shape: parse the agent's snake_case arguments,
//! build the camelCase params the editor expects, forward the command and
//! normalise the editor's reply into a [`ToolOutcome`].

pub mod asset;
pub mod console;
pub mod editor;
pub mod gameobject;
pub mod menu;
pub mod scene;
pub mod script;

use crate::backend::EditorBackend;
use crate::mcp::{RequestId, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use unity_mcp_core::{Result, ToolOutcome, UnityMcpError};

/// Tool definition for MCP tools/list
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Default outcome messages used when the editor omits its own
#[derive(Debug, Clone, Copy)]
pub(crate) struct Messages {
    pub success: &'static str,
    pub failure: &'static str,
}

/// Get list of available tools
pub fn list_tools() -> Vec<ToolDef> {
    vec![
        editor::definition(),
        menu::definition(),
        console::definition(),
        scene::definition(),
        gameobject::definition(),
        script::definition(),
        asset::definition(),
    ]
}

/// Handle a tools/call request
pub async fn handle_tool_call<B: EditorBackend>(
    name: &str,
    arguments: serde_json::Value,
    id: Option<RequestId>,
    backend: &Arc<Mutex<B>>,
) -> Response {
    debug!(tool = name, "Tool call");

    let result = match name {
        editor::NAME => editor::run(arguments, backend).await,
        menu::NAME => menu::run(arguments, backend).await,
        console::NAME => console::run(arguments, backend).await,
        scene::NAME => scene::run(arguments, backend).await,
        gameobject::NAME => gameobject::run(arguments, backend).await,
        script::NAME => script::run(arguments, backend).await,
        asset::NAME => asset::run(arguments, backend).await,
        _ => Err(UnityMcpError::InvalidParams(format!("Unknown tool: {}", name))),
    };

    match result {
        Ok(outcome) => Response::success(id, tool_result(&outcome)),
        Err(e) if e.is_editor_failure() => {
            warn!(tool = name, "Editor call failed: {}", e);
            Response::success(id, tool_result(&ToolOutcome::failure(e.to_string())))
        }
        Err(e) => Response::error(id, e.code(), e.to_string()),
    }
}

/// Wrap an outcome as an MCP tools/call result
pub fn tool_result(outcome: &ToolOutcome) -> serde_json::Value {
    serde_json::json!({
        "content": [{ "type": "text", "text": outcome.to_json_string() }],
        "isError": !outcome.success,
    })
}

/// Deserialize tool arguments, treating a missing object as empty
pub(crate) fn parse_args<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| UnityMcpError::InvalidParams(e.to_string()))
}

/// Treat an explicit `null` argument the same as an absent one
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Send a command and normalise the editor's reply
pub(crate) async fn forward<B: EditorBackend, P: Serialize>(
    backend: &Arc<Mutex<B>>,
    command_type: &str,
    params: &P,
    messages: Messages,
) -> Result<ToolOutcome> {
    let params = serde_json::to_value(params)?;
    let result = {
        let mut backend = backend.lock().await;
        backend.send_command(command_type, params).await?
    };
    Ok(ToolOutcome::from_editor_result(
        result,
        messages.success,
        messages.failure,
    ))
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_names() {
        let names: Vec<String> = list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "manage_editor",
                "execute_menu_item",
                "read_console",
                "manage_scene",
                "manage_gameobject",
                "manage_script",
                "manage_asset",
            ]
        );
    }

    #[test]
    fn test_schemas_are_objects() {
        for tool in list_tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(!tool.description.is_empty());
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let backend = RecordingBackend::replying(vec![]);
        let resp = handle_tool_call("spawn_dragon", json!({}), Some(RequestId::Number(1)), &backend).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32602);
        assert!(err.message.contains("spawn_dragon"));
        assert!(backend.lock().await.sent.is_empty());
    }

    #[tokio::test]
    async fn test_connection_failure_is_tool_error() {
        let backend = RecordingBackend::replying(vec![Err(UnityMcpError::ConnectionUnavailable(
            "connection refused".into(),
        ))]);
        let resp = handle_tool_call(
            "manage_scene",
            json!({"action": "get_active"}),
            Some(RequestId::Number(3)),
            &backend,
        )
        .await;
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Not connected to Unity: connection refused"));
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let backend = RecordingBackend::replying(vec![]);
        let resp = handle_tool_call("manage_scene", json!({}), Some(RequestId::Number(4)), &backend).await;
        assert_eq!(resp.error.unwrap().code, -32602);
    }
}
