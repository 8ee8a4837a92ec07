//! Transport abstractions for the editor bridge
//!
//! Provides AsyncReader/AsyncWriter traits so the connection logic does not
//! care whether bytes travel over a socket or an in-memory mock.

use async_trait::async_trait;
use unity_mcp_core::Result;

/// Trait for async reading from a transport
#[async_trait]
pub trait AsyncReader: Send {
    /// Read one complete message from the transport
    async fn read_message(&mut self) -> Result<Vec<u8>>;
}

/// Trait for async writing to a transport
#[async_trait]
pub trait AsyncWriter: Send + Sync {
    /// Write a complete message to the transport
    async fn write_message(&mut self, data: &[u8]) -> Result<()>;
}

/// First 200 characters of a payload, for debug logs
pub(crate) fn preview(data: &[u8]) -> String {
    String::from_utf8_lossy(data).chars().take(200).collect()
}
