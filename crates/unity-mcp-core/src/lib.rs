//! # unity-mcp-core
//!
//! Core types shared by the Unity MCP adapter crates:
//! - Error type and JSON-RPC error codes
//! - Editor command envelope and reply decoding
//! - Normalised tool outcomes

pub mod command;
pub mod error;
pub mod outcome;

pub use command::{EditorCommand, EditorReply, PING_BYTES, PING_COMMAND, ReplyStatus};
pub use error::{Result, UnityMcpError, error_codes};
pub use outcome::ToolOutcome;
