//! `manage_script`: create, read, update and delete C# scripts
//!
//! Script bodies travel base64-encoded on create/update so that quoting and
//! line endings survive the editor's JSON handling; the editor may reply with
//! encoded contents too, which are decoded before reaching the agent.

use super::{Messages, ToolDef, forward, parse_args};
use crate::backend::EditorBackend;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "manage_script";

const MESSAGES: Messages = Messages {
    success: "Script operation successful.",
    failure: "An unknown error occurred during script management.",
};

/// Arguments for manage_script
#[derive(Debug, Deserialize)]
pub struct ManageScriptArgs {
    pub action: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(default)]
    pub script_type: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Params sent to the editor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageScriptParams {
    pub action: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_contents: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub contents_encoded: bool,
}

impl From<ManageScriptArgs> for ManageScriptParams {
    fn from(args: ManageScriptArgs) -> Self {
        let encode = matches!(args.action.as_str(), "create" | "update");
        let (contents, encoded_contents) = match args.contents {
            Some(text) if encode => (None, Some(STANDARD.encode(text.as_bytes()))),
            other => (other, None),
        };

        Self {
            contents_encoded: encoded_contents.is_some(),
            action: args.action,
            name: args.name,
            path: args.path,
            namespace: args.namespace,
            script_type: args.script_type,
            contents,
            encoded_contents,
        }
    }
}

/// Replace `encodedContents` in reply data with plain `contents`
fn decode_contents(data: &mut Value) -> std::result::Result<(), String> {
    let Some(map) = data.as_object_mut() else {
        return Ok(());
    };
    let encoded = map
        .get("contentsEncoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(());
    }

    map.remove("contentsEncoded");
    let Some(Value::String(encoded)) = map.remove("encodedContents") else {
        return Ok(());
    };
    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| format!("Failed to decode script contents: {}", e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| format!("Script contents are not valid UTF-8: {}", e))?;
    map.insert("contents".to_string(), Value::String(text));
    Ok(())
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Manages C# scripts in the Unity project: create, read, update or delete a script by name and folder path.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "Operation to perform",
                    "enum": ["create", "read", "update", "delete"]
                },
                "name": {
                    "type": "string",
                    "description": "Script name without the .cs extension"
                },
                "path": {
                    "type": "string",
                    "description": "Folder under Assets/ (e.g. \"Assets/Scripts/Player\")"
                },
                "contents": {
                    "type": "string",
                    "description": "Full C# source for create/update"
                },
                "script_type": {
                    "type": "string",
                    "description": "Template hint: MonoBehaviour, ScriptableObject, Editor, ..."
                },
                "namespace": {
                    "type": "string",
                    "description": "Namespace to wrap generated code in"
                }
            },
            "required": ["action", "name"]
        }),
    }
}

pub async fn run<B: EditorBackend>(
    arguments: Value,
    backend: &Arc<Mutex<B>>,
) -> Result<ToolOutcome> {
    let args: ManageScriptArgs = parse_args(arguments)?;
    let params = ManageScriptParams::from(args);
    let mut outcome = forward(backend, NAME, &params, MESSAGES).await?;

    if outcome.success {
        if let Some(data) = outcome.data.as_mut() {
            if let Err(message) = decode_contents(data) {
                return Ok(ToolOutcome::failure(message));
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingBackend;
    use serde_json::json;

    const SOURCE: &str = "using UnityEngine;\n\npublic class Spinner : MonoBehaviour\n{\n    void Update() { transform.Rotate(0, 90 * Time.deltaTime, 0); }\n}\n";

    #[tokio::test]
    async fn test_create_encodes_contents() {
        let backend = RecordingBackend::replying(vec![]);
        run(
            json!({
                "action": "create",
                "name": "Spinner",
                "path": "Assets/Scripts",
                "contents": SOURCE,
                "script_type": "MonoBehaviour"
            }),
            &backend,
        )
        .await
        .unwrap();

        let guard = backend.lock().await;
        let params = &guard.sent[0].1;
        assert_eq!(params["contentsEncoded"], true);
        assert!(params.get("contents").is_none());
        assert_eq!(params["scriptType"], "MonoBehaviour");

        let encoded = params["encodedContents"].as_str().unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), SOURCE);
    }

    #[tokio::test]
    async fn test_read_decodes_reply() {
        let backend = RecordingBackend::replying(vec![Ok(json!({
            "success": true,
            "message": "Script 'Spinner.cs' read successfully.",
            "data": {
                "path": "Assets/Scripts/Spinner.cs",
                "contentsEncoded": true,
                "encodedContents": STANDARD.encode(SOURCE)
            }
        }))]);

        let outcome = run(json!({"action": "read", "name": "Spinner"}), &backend)
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(
            outcome.data,
            Some(json!({"path": "Assets/Scripts/Spinner.cs", "contents": SOURCE}))
        );

        let guard = backend.lock().await;
        assert_eq!(guard.sent[0].1, json!({"action": "read", "name": "Spinner"}));
    }

    #[tokio::test]
    async fn test_plain_reply_untouched() {
        let backend = RecordingBackend::replying(vec![Ok(json!({
            "success": true,
            "data": {"contents": "// empty"}
        }))]);
        let outcome = run(json!({"action": "read", "name": "Empty"}), &backend)
            .await
            .unwrap();
        assert_eq!(outcome.message, "Script operation successful.");
        assert_eq!(outcome.data, Some(json!({"contents": "// empty"})));
    }

    #[tokio::test]
    async fn test_corrupt_encoding_is_failure() {
        let backend = RecordingBackend::replying(vec![Ok(json!({
            "success": true,
            "data": {"contentsEncoded": true, "encodedContents": "***"}
        }))]);
        let outcome = run(json!({"action": "read", "name": "Broken"}), &backend)
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Failed to decode script contents"));
    }

    #[test]
    fn test_delete_keeps_contents_plain() {
        let params = ManageScriptParams::from(ManageScriptArgs {
            action: "delete".into(),
            name: "Old".into(),
            path: None,
            contents: Some("ignored".into()),
            script_type: None,
            namespace: None,
        });
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({"action": "delete", "name": "Old", "contents": "ignored"})
        );
    }
}
