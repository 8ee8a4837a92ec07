//! Editor command envelope and reply decoding
//!
//! Commands go to the editor as `{"type": "<command>", "params": {...}}`.
//! Replies carry a `status` field; anything other than `"error"` is a success
//! whose payload lives under `result`.

use crate::error::{Result, UnityMcpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command type used for connection health checks
pub const PING_COMMAND: &str = "ping";

/// Raw bytes sent for a health check; the editor special-cases them
pub const PING_BYTES: &[u8] = b"ping";

/// Command sent to the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorCommand {
    #[serde(rename = "type")]
    pub command_type: String,
    #[serde(default)]
    pub params: Value,
}

impl EditorCommand {
    pub fn new(command_type: impl Into<String>, params: Value) -> Self {
        Self {
            command_type: command_type.into(),
            params,
        }
    }

    /// Wire bytes for this command
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.command_type == PING_COMMAND {
            return Ok(PING_BYTES.to_vec());
        }
        Ok(serde_json::to_vec(self)?)
    }
}

/// Reply status reported by the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Error,
    #[serde(other)]
    Other,
}

/// Reply received from the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorReply {
    #[serde(default)]
    pub status: Option<ReplyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Usually a string; other shapes are tolerated and skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl EditorReply {
    /// Parse a reply from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            UnityMcpError::RemoteCallFailed(format!("Invalid response from Unity: {}", e))
        })
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(ReplyStatus::Success)
    }

    /// The `result` payload, or the editor's failure as an error
    pub fn into_result(self) -> Result<Value> {
        if self.status == Some(ReplyStatus::Error) {
            let message = [self.error.as_ref(), self.message.as_ref()]
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .find(|m| !m.is_empty())
                .unwrap_or("Unknown Unity error")
                .to_string();
            return Err(UnityMcpError::RemoteCallFailed(message));
        }
        Ok(self
            .result
            .unwrap_or_else(|| Value::Object(Default::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_envelope() {
        let cmd = EditorCommand::new("manage_scene", json!({"action": "get_hierarchy"}));
        let value: Value = serde_json::from_slice(&cmd.to_bytes().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"type": "manage_scene", "params": {"action": "get_hierarchy"}})
        );
    }

    #[test]
    fn test_ping_is_raw_bytes() {
        let cmd = EditorCommand::new(PING_COMMAND, json!({}));
        assert_eq!(cmd.to_bytes().unwrap(), b"ping".to_vec());
    }

    #[test]
    fn test_success_reply_returns_result() {
        let reply = EditorReply::from_slice(
            br#"{"status":"success","result":{"success":true,"data":{"isPlaying":false}}}"#,
        )
        .unwrap();
        assert!(reply.is_success());
        let result = reply.into_result().unwrap();
        assert_eq!(result["data"]["isPlaying"], false);
    }

    #[test]
    fn test_missing_result_is_empty_object() {
        let reply = EditorReply::from_slice(br#"{"status":"success"}"#).unwrap();
        assert_eq!(reply.into_result().unwrap(), json!({}));
    }

    #[test]
    fn test_error_reply_with_structured_error() {
        let reply = EditorReply::from_slice(
            br#"{"status":"error","error":{"code":3},"message":"Scene not found"}"#,
        )
        .unwrap();
        let err = reply.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unity command failed: Scene not found");

        let reply = EditorReply::from_slice(br#"{"status":"error","error":42}"#).unwrap();
        let err = reply.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unity command failed: Unknown Unity error");
    }

    #[test]
    fn test_error_reply_prefers_error_field() {
        let reply = EditorReply::from_slice(
            br#"{"status":"error","error":"Unknown command type: foo","message":"ignored"}"#,
        )
        .unwrap();
        let err = reply.into_result().unwrap_err();
        assert!(matches!(err, UnityMcpError::RemoteCallFailed(ref m) if m == "Unknown command type: foo"));
    }

    #[test]
    fn test_error_reply_falls_back_to_message() {
        let reply =
            EditorReply::from_slice(br#"{"status":"error","message":"Scene not found"}"#).unwrap();
        let err = reply.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unity command failed: Scene not found");

        let bare = EditorReply::from_slice(br#"{"status":"error"}"#).unwrap();
        let err = bare.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unity command failed: Unknown Unity error");
    }

    #[test]
    fn test_unknown_status_is_not_an_error() {
        let reply =
            EditorReply::from_slice(br#"{"status":"pending","result":{"queued":true}}"#).unwrap();
        assert!(!reply.is_success());
        assert_eq!(reply.into_result().unwrap(), json!({"queued": true}));
    }

    #[test]
    fn test_garbage_reply() {
        let err = EditorReply::from_slice(b"[1, 2").unwrap_err();
        assert!(err.is_editor_failure());
    }
}
