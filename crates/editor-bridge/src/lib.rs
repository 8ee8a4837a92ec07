//! Bridge between the MCP server and a running Unity Editor
//!
//! This crate provides:
//! - Connection settings (host, port, timeouts, reply size limit)
//! - Transport abstractions (AsyncReader/AsyncWriter traits)
//! - TCP transport reading bare JSON replies
//! - `UnityBridge`, the `EditorBackend` the server forwards tool calls to

pub mod config;
pub mod connection;
pub mod tcp;
pub mod transport;

pub use config::BridgeConfig;
pub use connection::{EditorConnection, UnityBridge};
pub use transport::{AsyncReader, AsyncWriter};
