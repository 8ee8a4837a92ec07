//! `manage_scene`: open, save, create and inspect scenes

use super::{Messages, ToolDef, forward, parse_args};
use crate::backend::EditorBackend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "manage_scene";

const MESSAGES: Messages = Messages {
    success: "Scene operation successful.",
    failure: "An unknown error occurred during scene management.",
};

/// Arguments for manage_scene
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ManageSceneArgs {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_index: Option<i64>,
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Manages Unity scenes: load, save, create, and query the active scene, build settings or the scene hierarchy.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "Operation to perform",
                    "enum": ["load", "save", "create", "get_hierarchy", "get_active", "get_build_settings"]
                },
                "name": {
                    "type": "string",
                    "description": "Scene name, without extension"
                },
                "path": {
                    "type": "string",
                    "description": "Asset path of the scene folder or file (e.g. \"Assets/Scenes\")"
                },
                "build_index": {
                    "type": "integer",
                    "description": "Build index for loading a scene from build settings"
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
    let args: ManageSceneArgs = parse_args(arguments)?;
    forward(backend, NAME, &args, MESSAGES).await
}
