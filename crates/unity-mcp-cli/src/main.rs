//! Unity MCP Server
//!
//! Connects to the Unity Editor bridge plugin over TCP and exposes its
//! editor, scene, asset, script and console operations as MCP tools on stdio.

use anyhow::Result;
use clap::Parser;
use editor_bridge::{BridgeConfig, UnityBridge};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use unity_mcp_server::UnityMcpServer;

#[derive(Debug, Parser)]
#[command(name = "unity-mcp", version, about = "Unity Editor integration via Model Context Protocol")]
struct Args {
    /// Host the Unity editor bridge listens on
    #[arg(long, env = "UNITY_HOST", default_value = editor_bridge::config::DEFAULT_HOST)]
    host: String,

    /// Port the Unity editor bridge listens on
    #[arg(long, env = "UNITY_PORT", default_value_t = editor_bridge::config::DEFAULT_PORT)]
    port: u16,

    /// Seconds to wait for a reply from the editor
    #[arg(long, env = "UNITY_CONNECTION_TIMEOUT", default_value_t = 86400)]
    timeout_secs: u64,

    /// Seconds to wait when opening the connection
    #[arg(long, env = "UNITY_CONNECT_TIMEOUT", default_value_t = 5)]
    connect_timeout_secs: u64,

    /// Largest reply accepted from the editor, in bytes
    #[arg(long, env = "UNITY_MAX_MESSAGE_SIZE", default_value_t = 16 * 1024 * 1024)]
    max_message_size: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "UNITY_MCP_LOG", default_value = "info")]
    log_level: String,
}

impl Args {
    fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            host: self.host.clone(),
            port: self.port,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            connection_timeout: Duration::from_secs(self.timeout_secs),
            max_message_size: self.max_message_size,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout carries the protocol
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("UnityMCP server starting up");

    let mut bridge = UnityBridge::new(args.bridge_config());
    match bridge.connect().await {
        Ok(()) => info!("Connected to Unity on startup"),
        Err(e) => warn!("Could not connect to Unity on startup: {}", e),
    }

    let server = UnityMcpServer::new(bridge);
    server
        .run_stdio()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["unity-mcp"]).unwrap();
        let config = args.bridge_config();
        assert_eq!(config.address(), "localhost:6400");
        assert_eq!(config.connection_timeout, Duration::from_secs(86400));
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "unity-mcp",
            "--host",
            "10.0.0.5",
            "--port",
            "6401",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        let config = args.bridge_config();
        assert_eq!(config.address(), "10.0.0.5:6401");
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }
}
