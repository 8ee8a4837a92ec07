//! `manage_asset`: import, create, modify, move, delete and search assets

use super::{Messages, ToolDef, forward, null_as_default, parse_args};
use crate::backend::EditorBackend;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "manage_asset";

const MESSAGES: Messages = Messages {
    success: "Asset operation successful.",
    failure: "An unknown error occurred during asset management.",
};

/// Arguments for manage_asset
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ManageAssetArgs {
    pub action: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generate_preview: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_date_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Performs asset operations in the Unity project: import, create, modify, delete, duplicate, move, rename, search, get_info, create_folder and get_components.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "Operation to perform",
                    "enum": ["import", "create", "modify", "delete", "duplicate", "move", "rename", "search", "get_info", "create_folder", "get_components"]
                },
                "path": {
                    "type": "string",
                    "description": "Asset path (e.g. \"Materials/Red.mat\" or \"Assets/Materials/Red.mat\"); search scope for search"
                },
                "asset_type": {
                    "type": "string",
                    "description": "Asset type for create (e.g. Material, Folder)"
                },
                "properties": {
                    "type": "object",
                    "description": "Properties for create/modify"
                },
                "destination": {
                    "type": "string",
                    "description": "Target path for duplicate/move/rename"
                },
                "generate_preview": {
                    "type": "boolean",
                    "description": "Include a base64 preview image in get_info",
                    "default": false
                },
                "search_pattern": { "type": "string", "description": "Search pattern (e.g. \"*.prefab\")" },
                "filter_type": { "type": "string", "description": "Restrict search to an asset type" },
                "filter_date_after": {
                    "type": "string",
                    "description": "ISO 8601 timestamp; only assets modified after it"
                },
                "page_size": { "type": "integer", "description": "Search results per page" },
                "page_number": { "type": "integer", "description": "Search page, starting at 1" }
            },
            "required": ["action", "path"]
        }),
    }
}

pub async fn run<B: EditorBackend>(
    arguments: Value,
    backend: &Arc<Mutex<B>>,
) -> Result<ToolOutcome> {
    let args: ManageAssetArgs = parse_args(arguments)?;
    forward(backend, NAME, &args, MESSAGES).await
}
