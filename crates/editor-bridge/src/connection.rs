//! Connection to a running Unity Editor

use crate::config::BridgeConfig;
use crate::tcp::{TcpReadWrapper, TcpWriteWrapper};
use crate::transport::{AsyncReader, AsyncWriter, preview};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use unity_mcp_core::{EditorCommand, EditorReply, PING_BYTES, Result, UnityMcpError};
use unity_mcp_server::EditorBackend;

/// One socket session with the editor
pub struct EditorConnection {
    reader: Box<dyn AsyncReader>,
    writer: Box<dyn AsyncWriter>,
    reply_timeout: Duration,
    peer: String,
}

impl EditorConnection {
    /// Open a TCP connection to the editor
    pub async fn connect(config: &BridgeConfig) -> Result<Self> {
        let address = config.address();
        info!("Connecting to Unity at {}", address);

        let stream = timeout(config.connect_timeout, TcpStream::connect(&address))
            .await
            .map_err(|_| {
                UnityMcpError::ConnectionUnavailable(format!(
                    "Timed out connecting to Unity at {}",
                    address
                ))
            })?
            .map_err(|e| {
                UnityMcpError::ConnectionUnavailable(format!(
                    "Could not connect to Unity at {}: {}",
                    address, e
                ))
            })?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!("Failed to set TCP_NODELAY: {}", e);
        }

        let (read_half, write_half) = stream.into_split();
        Ok(Self::from_parts(
            TcpReadWrapper::new(read_half, config.max_message_size),
            TcpWriteWrapper(write_half),
            config.connection_timeout,
            address,
        ))
    }

    /// Build a connection over an arbitrary transport
    pub fn from_parts<R, W>(
        reader: R,
        writer: W,
        reply_timeout: Duration,
        peer: impl Into<String>,
    ) -> Self
    where
        R: AsyncReader + 'static,
        W: AsyncWriter + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            reply_timeout,
            peer: peer.into(),
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Write one message and wait for the reply
    async fn exchange(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        debug!("[Rust→Unity] len={} json={}", data.len(), preview(data));
        self.writer.write_message(data).await?;

        let reply = timeout(self.reply_timeout, self.reader.read_message())
            .await
            .map_err(|_| {
                UnityMcpError::RemoteCallFailed(format!(
                    "Timed out after {:?} waiting for Unity",
                    self.reply_timeout
                ))
            })??;

        debug!("[Unity→Rust] len={} json={}", reply.len(), preview(&reply));
        Ok(reply)
    }

    /// Check the editor still answers
    pub async fn ping(&mut self) -> Result<()> {
        let reply = EditorReply::from_slice(&self.exchange(PING_BYTES).await?)?;
        if reply.is_success() {
            Ok(())
        } else {
            Err(UnityMcpError::RemoteCallFailed(
                "Connection verification failed".into(),
            ))
        }
    }

    /// Send a command and return the decoded reply
    ///
    /// Errors here mean the session is unusable; an editor-reported failure
    /// still comes back as `Ok` and is surfaced by [`EditorReply::into_result`].
    pub async fn request(&mut self, command: &EditorCommand) -> Result<EditorReply> {
        let data = command.to_bytes()?;
        let reply = self.exchange(&data).await?;
        EditorReply::from_slice(&reply)
    }
}

/// Bridge to the Unity Editor
///
/// Holds at most one connection. A connection that fails its health check or
/// breaks mid-call is dropped and re-opened on the next command.
pub struct UnityBridge {
    config: BridgeConfig,
    connection: Option<EditorConnection>,
}

impl UnityBridge {
    /// Create a new bridge (not connected yet)
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Connect to the editor if not already connected
    pub async fn connect(&mut self) -> Result<()> {
        if self.connection.is_none() {
            let connection = EditorConnection::connect(&self.config).await?;
            info!("Connected to Unity at {}", connection.peer());
            self.connection = Some(connection);
        }
        Ok(())
    }

    /// Drop the current connection, if any
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            info!("Disconnected from Unity at {}", connection.peer());
        }
    }

    /// Verify the held connection and reconnect when it no longer answers
    async fn ensure_connection(&mut self) -> Result<&mut EditorConnection> {
        let alive = match self.connection.as_mut() {
            Some(connection) => match connection.ping().await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Unity connection check failed, reconnecting: {}", e);
                    false
                }
            },
            None => false,
        };

        if !alive {
            self.connection = None;
            self.connect().await?;
        }

        self.connection
            .as_mut()
            .ok_or_else(|| UnityMcpError::ConnectionUnavailable("No connection to Unity".into()))
    }
}

#[async_trait]
impl EditorBackend for UnityBridge {
    async fn send_command(&mut self, command_type: &str, params: Value) -> Result<Value> {
        let command = EditorCommand::new(command_type, params);
        let connection = self.ensure_connection().await?;

        let reply = connection.request(&command).await;
        match reply {
            Ok(reply) => reply.into_result(),
            Err(e) => {
                error!("Communication error with Unity: {}", e);
                self.connection = None;
                Err(e)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.disconnect();
        Ok(())
    }
}
