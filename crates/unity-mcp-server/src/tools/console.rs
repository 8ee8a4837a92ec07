//! `read_console`: fetch or clear editor console messages

use super::{Messages, ToolDef, forward, parse_args};
use crate::backend::EditorBackend;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use unity_mcp_core::{Result, ToolOutcome};

pub const NAME: &str = "read_console";

const MESSAGES: Messages = Messages {
    success: "Console read successfully.",
    failure: "An unknown error occurred while reading the console.",
};

const DEFAULT_TYPES: [&str; 3] = ["error", "warning", "log"];

/// Arguments for read_console as the agent sends them
#[derive(Debug, Deserialize)]
pub struct ReadConsoleArgs {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub count: Option<Value>,
    #[serde(default)]
    pub filter_text: Option<String>,
    #[serde(default)]
    pub since_timestamp: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub include_stacktrace: Option<bool>,
}

/// Params sent to the editor, with defaults applied
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadConsoleParams {
    pub action: String,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_timestamp: Option<String>,
    pub format: String,
    pub include_stacktrace: bool,
}

impl From<ReadConsoleArgs> for ReadConsoleParams {
    fn from(args: ReadConsoleArgs) -> Self {
        Self {
            action: args
                .action
                .map(|a| a.to_lowercase())
                .unwrap_or_else(|| "get".to_string()),
            types: args
                .types
                .unwrap_or_else(|| DEFAULT_TYPES.iter().map(|t| t.to_string()).collect()),
            count: args.count.as_ref().and_then(parse_count),
            filter_text: args.filter_text,
            since_timestamp: args.since_timestamp,
            format: args.format.unwrap_or_else(|| "detailed".to_string()),
            include_stacktrace: args.include_stacktrace.unwrap_or(true),
        }
    }
}

/// Accept `5`, `5.0` or `"5"`; anything else is dropped
fn parse_count(value: &Value) -> Option<i64> {
    let count = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if count.is_none() && !value.is_null() {
        debug!("Ignoring non-numeric console count: {}", value);
    }
    count
}

pub fn definition() -> ToolDef {
    ToolDef {
        name: NAME.into(),
        description: "Gets messages from or clears the Unity Editor console. Messages can be filtered by type, text and timestamp.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "Operation: get (default) or clear",
                    "enum": ["get", "clear"]
                },
                "types": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["error", "warning", "log", "all"] },
                    "description": "Message types to include (default: error, warning, log)"
                },
                "count": {
                    "type": ["integer", "string"],
                    "description": "Maximum number of messages to return (integer or numeric string)"
                },
                "filter_text": {
                    "type": "string",
                    "description": "Only return messages containing this text"
                },
                "since_timestamp": {
                    "type": "string",
                    "description": "ISO 8601 timestamp; only return messages after it"
                },
                "format": {
                    "type": "string",
                    "description": "Output format",
                    "enum": ["plain", "detailed", "json"],
                    "default": "detailed"
                },
                "include_stacktrace": {
                    "type": "boolean",
                    "description": "Include stack traces in the output",
                    "default": true
                }
            }
        }),
    }
}

pub async fn run<B: EditorBackend>(
    arguments: Value,
    backend: &Arc<Mutex<B>>,
) -> Result<ToolOutcome> {
    let args: ReadConsoleArgs = parse_args(arguments)?;
    let params = ReadConsoleParams::from(args);
    forward(backend, NAME, &params, MESSAGES).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults_applied() {
        let backend = RecordingBackend::replying(vec![Ok(json!({
            "success": true,
            "message": "Retrieved 2 log entries.",
            "data": [
                {"type": "Error", "message": "NullReferenceException"},
                {"type": "Log", "message": "Hello"}
            ]
        }))]);

        let outcome = run(Value::Null, &backend).await.unwrap();
        assert_eq!(outcome.message, "Retrieved 2 log entries.");
        assert_eq!(outcome.data.unwrap().as_array().unwrap().len(), 2);

        let guard = backend.lock().await;
        assert_eq!(
            guard.sent[0].1,
            json!({
                "action": "get",
                "types": ["error", "warning", "log"],
                "format": "detailed",
                "includeStacktrace": true
            })
        );
    }

    #[test]
    fn test_count_schema_allows_strings() {
        let schema = definition().input_schema;
        assert_eq!(schema["properties"]["count"]["type"], json!(["integer", "string"]));
    }

    #[test]
    fn test_count_variants() {
        assert_eq!(parse_count(&json!(10)), Some(10));
        assert_eq!(parse_count(&json!(7.0)), Some(7));
        assert_eq!(parse_count(&json!("25")), Some(25));
        assert_eq!(parse_count(&json!("many")), None);
        assert_eq!(parse_count(&Value::Null), None);
    }

    #[test]
    fn test_filters_and_clear() {
        let args: ReadConsoleArgs = serde_json::from_value(json!({
            "action": "CLEAR",
            "types": ["error"],
            "count": "5",
            "filter_text": "Shader",
            "include_stacktrace": false
        }))
        .unwrap();
        let params = ReadConsoleParams::from(args);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "action": "clear",
                "types": ["error"],
                "count": 5,
                "filterText": "Shader",
                "format": "detailed",
                "includeStacktrace": false
            })
        );
    }
}
