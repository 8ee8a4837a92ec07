//! `manage_gameobject`: create, modify, find and delete GameObjects

use super::{Messages, ToolDef, forward, null_as_default, parse_args};
use crate::backend::EditorBackend;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "manage_gameobject";

const MESSAGES: Messages = Messages {
    success: "GameObject operation successful.",
    failure: "An unknown error occurred during GameObject management.",
};

const DEFAULT_PREFAB_FOLDER: &str = "Assets/Prefabs";

/// Arguments for manage_gameobject
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct ManageGameObjectArgs {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_to_add: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub save_as_prefab: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefab_path: Option<String>,
    /// Only used to derive `prefab_path`; never sent to the editor
    #[serde(default, skip_serializing)]
    pub prefab_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_to_remove: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub find_all: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_in_children: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_inactive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
}

impl ManageGameObjectArgs {
    /// Fill in or validate `prefab_path` for `create` with `save_as_prefab`.
    ///
    /// Returns the message for a failure outcome when the path cannot be used.
    pub fn resolve_prefab_path(&mut self) -> std::result::Result<(), String> {
        if self.action != "create" || !self.save_as_prefab {
            return Ok(());
        }

        if let Some(path) = &self.prefab_path {
            if !path.to_lowercase().ends_with(".prefab") {
                return Err(format!(
                    "Invalid prefab_path: '{}' must end with .prefab",
                    path
                ));
            }
            return Ok(());
        }

        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(
                    "Cannot create default prefab path: 'name' parameter is missing.".to_string(),
                );
            }
        };
        let folder = self
            .prefab_folder
            .as_deref()
            .unwrap_or(DEFAULT_PREFAB_FOLDER)
            .trim_end_matches(['/', '\\']);
        let path = format!("{}/{}.prefab", folder, name).replace('\\', "/");
        self.prefab_path = Some(path);
        Ok(())
    }
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Manages GameObjects in the open scene: create (optionally from a primitive or saved as a prefab), modify, delete, find, and add/remove/configure components.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "Operation to perform",
                    "enum": ["create", "modify", "delete", "find", "get_components", "add_component", "remove_component", "set_component_property"]
                },
                "target": {
                    "description": "GameObject identifier (name, path or instance ID) for modify/delete/component actions"
                },
                "search_method": {
                    "type": "string",
                    "description": "How to interpret target/search_term",
                    "enum": ["by_name", "by_tag", "by_layer", "by_component", "by_path", "by_id"]
                },
                "name": {
                    "type": "string",
                    "description": "Name of the GameObject (create/modify)"
                },
                "tag": { "type": "string", "description": "Tag to assign" },
                "parent": { "description": "Parent GameObject identifier" },
                "position": {
                    "type": "array", "items": { "type": "number" },
                    "description": "Local position [x, y, z]"
                },
                "rotation": {
                    "type": "array", "items": { "type": "number" },
                    "description": "Local euler rotation [x, y, z]"
                },
                "scale": {
                    "type": "array", "items": { "type": "number" },
                    "description": "Local scale [x, y, z]"
                },
                "components_to_add": {
                    "type": "array",
                    "description": "Component type names (or {typeName, properties} objects) to add"
                },
                "primitive_type": {
                    "type": "string",
                    "description": "Primitive to create: Cube, Sphere, Capsule, Cylinder, Plane, Quad"
                },
                "save_as_prefab": {
                    "type": "boolean",
                    "description": "Save the created GameObject as a prefab",
                    "default": false
                },
                "prefab_path": {
                    "type": "string",
                    "description": "Prefab asset path ending in .prefab; derived from prefab_folder and name when omitted"
                },
                "prefab_folder": {
                    "type": "string",
                    "description": "Folder for derived prefab paths",
                    "default": DEFAULT_PREFAB_FOLDER
                },
                "set_active": { "type": "boolean", "description": "Set the active state" },
                "layer": { "type": "string", "description": "Layer name to assign" },
                "components_to_remove": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Component type names to remove"
                },
                "component_properties": {
                    "type": "object",
                    "description": "Map of component type name to {property: value} to set"
                },
                "search_term": { "type": "string", "description": "Search term for find" },
                "find_all": {
                    "type": "boolean",
                    "description": "Return all matches instead of the first",
                    "default": false
                },
                "search_in_children": {
                    "type": "boolean",
                    "description": "Restrict search to children of target",
                    "default": false
                },
                "search_inactive": {
                    "type": "boolean",
                    "description": "Include inactive GameObjects",
                    "default": false
                },
                "component_name": {
                    "type": "string",
                    "description": "Component type for get_components/set_component_property"
                }
            },
            "required": ["action"]
        }),
    }
}

pub async fn run<B: EditorBackend>(
    arguments: Value,
    backend: &Arc<Mutex<B>>,
) -> Result<ToolOutcome> {
    let mut args: ManageGameObjectArgs = parse_args(arguments)?;
    if let Err(message) = args.resolve_prefab_path() {
        return Ok(ToolOutcome::failure(message));
    }
    forward(backend, NAME, &args, MESSAGES).await
}
