//! Error types for the Unity MCP adapter

use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, UnityMcpError>;

/// Adapter error types
#[derive(Debug, Error)]
pub enum UnityMcpError {
    /// No usable connection to the editor
    #[error("Not connected to Unity: {0}")]
    ConnectionUnavailable(String),

    /// The editor could not be reached mid-call, or reported a failure
    #[error("Unity command failed: {0}")]
    RemoteCallFailed(String),

    /// Tool or method arguments did not match the expected shape
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// MCP protocol error
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl UnityMcpError {
    /// JSON-RPC error code used when this error terminates a request
    pub fn code(&self) -> i32 {
        match self {
            UnityMcpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            UnityMcpError::ProtocolError(_) => error_codes::INVALID_REQUEST,
            _ => error_codes::INTERNAL_ERROR,
        }
    }

    /// Whether the error came from the editor connection rather than the caller
    pub fn is_editor_failure(&self) -> bool {
        matches!(
            self,
            UnityMcpError::ConnectionUnavailable(_) | UnityMcpError::RemoteCallFailed(_)
        )
    }
}

impl From<serde_json::Error> for UnityMcpError {
    fn from(err: serde_json::Error) -> Self {
        UnityMcpError::SerializationError(err.to_string())
    }
}

/// JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}
