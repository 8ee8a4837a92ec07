//! TCP transport implementation for the editor bridge
//!
//! The Unity side writes each reply as a bare JSON document with no length
//! prefix, so a message ends when the accumulated bytes parse as JSON.

use crate::transport::{AsyncReader, AsyncWriter};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use unity_mcp_core::{Result, UnityMcpError};

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Whether a buffer holds a whole JSON document yet
#[derive(Debug, PartialEq, Eq)]
enum DocumentState {
    Complete,
    Incomplete,
    Invalid(String),
}

fn document_state(buffer: &[u8]) -> DocumentState {
    match serde_json::from_slice::<IgnoredAny>(buffer) {
        Ok(_) => DocumentState::Complete,
        Err(e) if e.is_eof() => DocumentState::Incomplete,
        Err(e) => DocumentState::Invalid(e.to_string()),
    }
}

/// TCP read wrapper
pub struct TcpReadWrapper<R = OwnedReadHalf> {
    inner: R,
    max_message_size: usize,
}

impl<R> TcpReadWrapper<R> {
    pub fn new(inner: R, max_message_size: usize) -> Self {
        Self {
            inner,
            max_message_size,
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> AsyncReader for TcpReadWrapper<R> {
    async fn read_message(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];

        loop {
            let n = self
                .inner
                .read(&mut chunk)
                .await
                .map_err(|e| UnityMcpError::RemoteCallFailed(format!("TCP read failed: {}", e)))?;

            if n == 0 {
                if buffer.is_empty() {
                    return Err(UnityMcpError::RemoteCallFailed(
                        "Connection closed before receiving data".into(),
                    ));
                }
                return Err(UnityMcpError::RemoteCallFailed(format!(
                    "Connection closed with incomplete response ({} bytes)",
                    buffer.len()
                )));
            }

            buffer.extend_from_slice(&chunk[..n]);

            if buffer.len() > self.max_message_size {
                return Err(UnityMcpError::RemoteCallFailed(format!(
                    "Message too large: {} bytes",
                    buffer.len()
                )));
            }

            match document_state(&buffer) {
                DocumentState::Complete => return Ok(buffer),
                DocumentState::Incomplete => continue,
                DocumentState::Invalid(e) => {
                    return Err(UnityMcpError::RemoteCallFailed(format!(
                        "Invalid JSON from Unity: {}",
                        e
                    )));
                }
            }
        }
    }
}

/// TCP write wrapper
pub struct TcpWriteWrapper<W = OwnedWriteHalf>(pub W);

#[async_trait]
impl<W: AsyncWrite + Unpin + Send + Sync> AsyncWriter for TcpWriteWrapper<W> {
    async fn write_message(&mut self, data: &[u8]) -> Result<()> {
        self.0
            .write_all(data)
            .await
            .map_err(|e| UnityMcpError::RemoteCallFailed(format!("TCP write failed: {}", e)))?;

        // Flush to ensure data is sent
        self.0
            .flush()
            .await
            .map_err(|e| UnityMcpError::RemoteCallFailed(format!("TCP flush failed: {}", e)))?;

        Ok(())
    }
}
