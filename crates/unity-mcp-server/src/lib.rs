//! # unity-mcp-server
//!
//! MCP server that exposes Unity Editor tools to agents.
//!
//! This crate provides:
//! - `EditorBackend` trait for whatever carries commands to the editor
//! - MCP JSON-RPC protocol handling over stdio
//! - Tool implementations (manage_editor, manage_scene, manage_asset, ...)
//! - The `asset_creation_strategy` prompt

pub mod backend;
pub mod mcp;
pub mod prompts;
pub mod tools;
pub mod transport;

pub use backend::EditorBackend;

use std::sync::Arc;
use tokio::sync::Mutex;
use unity_mcp_core::Result;

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "UnityMCP";

/// Description returned as initialize instructions
pub const SERVER_DESCRIPTION: &str = "Unity Editor integration via Model Context Protocol";

/// Unity MCP server
pub struct UnityMcpServer<B: EditorBackend> {
    /// Connection to the editor
    backend: Arc<Mutex<B>>,
    /// Version reported to clients
    version: String,
}

impl<B: EditorBackend> UnityMcpServer<B> {
    /// Create a new server forwarding to the given backend
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Run the server on stdio transport
    pub async fn run_stdio(self) -> Result<()> {
        transport::stdio::run(self).await
    }

    /// Shared handle to the backend
    pub fn backend(&self) -> &Arc<Mutex<B>> {
        &self.backend
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}
