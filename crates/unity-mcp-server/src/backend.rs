//! Editor backend trait

use async_trait::async_trait;
use serde_json::Value;
use unity_mcp_core::Result;

/// Something that can carry editor commands to a Unity Editor
///
/// The server forwards every tool call through this trait. The TCP bridge is
/// the production implementation; tests substitute their own.
#[async_trait]
pub trait EditorBackend: Send + 'static {
    /// Send a command and return the editor's `result` payload
    async fn send_command(&mut self, command_type: &str, params: Value) -> Result<Value>;

    /// Whether a live connection is currently held
    fn is_connected(&self) -> bool;

    /// Called when the server shuts down
    async fn shutdown(&mut self) -> Result<()>;
}
