//! MCP prompts

use serde::Serialize;
use unity_mcp_core::{Result, UnityMcpError};

pub const ASSET_CREATION_STRATEGY: &str = "asset_creation_strategy";

/// Prompt definition for prompts/list
#[derive(Debug, Clone, Serialize)]
pub struct PromptDef {
    pub name: String,
    pub description: String,
    pub arguments: Vec<serde_json::Value>,
}

pub fn list_prompts() -> Vec<PromptDef> {
    vec![PromptDef {
        name: ASSET_CREATION_STRATEGY.into(),
        description: "Guide for discovering and using Unity MCP tools effectively.".into(),
        arguments: vec![],
    }]
}

fn asset_creation_strategy() -> String {
    [
        "Available Unity MCP Server Tools:",
        "",
        "For detailed usage, please refer to the specific tool's documentation.",
        "",
        "- `manage_editor`: Controls editor state (play/pause/stop) and queries info (state, selection).",
        "- `execute_menu_item`: Executes Unity Editor menu items by path (e.g., 'File/Save Project').",
        "- `read_console`: Reads or clears Unity console messages, with filtering options.",
        "- `manage_scene`: Manages scenes (load, save, create, get hierarchy).",
        "- `manage_gameobject`: Manages GameObjects in the scene (CRUD, find, components, assign properties).",
        "- `manage_script`: Manages C# script files (CRUD).",
        "- `manage_asset`: Manages project assets (import, create, modify, delete, search).",
        "",
    ]
    .join("\n")
}

/// Render a prompt for prompts/get
pub fn get_prompt(name: &str) -> Result<serde_json::Value> {
    let (description, text) = match name {
        ASSET_CREATION_STRATEGY => (
            "Guide for discovering and using Unity MCP tools effectively.",
            asset_creation_strategy(),
        ),
        _ => {
            return Err(UnityMcpError::InvalidParams(format!(
                "Unknown prompt: {}",
                name
            )));
        }
    };

    Ok(serde_json::json!({
        "description": description,
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    }))
}
