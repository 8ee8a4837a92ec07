//! Normalised tool results returned to the agent

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a tool call as seen by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolOutcome {
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Build an outcome from the `result` object the editor sends back for a
    /// tool command (`{"success", "message"?, "error"?, "data"?}`).
    ///
    /// Missing messages fall back to the supplied defaults.
    pub fn from_editor_result(result: Value, success_default: &str, failure_default: &str) -> Self {
        let succeeded = result
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if succeeded {
            let message = result
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(success_default)
                .to_string();
            let data = match result {
                Value::Object(mut map) => map.remove("data").filter(|d| !d.is_null()),
                _ => None,
            };
            Self::success(message, data)
        } else {
            let message = result
                .get("error")
                .and_then(Value::as_str)
                .or_else(|| result.get("message").and_then(Value::as_str))
                .unwrap_or(failure_default);
            Self::failure(message)
        }
    }

    /// Serialized form placed in the MCP text content item
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"success\":{},\"message\":{:?}}}",
                self.success, self.message
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_keeps_message_and_data() {
        let outcome = ToolOutcome::from_editor_result(
            json!({"success": true, "message": "Loaded scene 'Main'.", "data": {"path": "Assets/Main.unity"}}),
            "Scene operation successful.",
            "failed",
        );
        assert!(outcome.success);
        assert_eq!(outcome.message, "Loaded scene 'Main'.");
        assert_eq!(outcome.data, Some(json!({"path": "Assets/Main.unity"})));
    }

    #[test]
    fn test_success_default_message() {
        let outcome = ToolOutcome::from_editor_result(
            json!({"success": true}),
            "Scene operation successful.",
            "failed",
        );
        assert_eq!(outcome.message, "Scene operation successful.");
        assert_eq!(outcome.data, None);
    }

    #[test]
    fn test_failure_uses_error_field() {
        let outcome = ToolOutcome::from_editor_result(
            json!({"success": false, "error": "GameObject 'Cube' not found."}),
            "ok",
            "An unknown error occurred during GameObject management.",
        );
        assert!(!outcome.success);
        assert_eq!(outcome.message, "GameObject 'Cube' not found.");
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let outcome = ToolOutcome::from_editor_result(json!({}), "ok", "unknown failure");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "unknown failure");
    }

    #[test]
    fn test_data_omitted_from_failure_json() {
        let text = ToolOutcome::failure("boom").to_json_string();
        assert_eq!(text, r#"{"success":false,"message":"boom"}"#);
    }
}
