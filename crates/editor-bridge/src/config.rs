//! Connection settings for the Unity editor bridge

use std::time::Duration;

/// Default editor host
pub const DEFAULT_HOST: &str = "localhost";

/// Default port the Unity bridge plugin listens on
pub const DEFAULT_PORT: u16 = 6400;

/// Settings for reaching the editor
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    /// Bound on establishing the TCP connection
    pub connect_timeout: Duration,
    /// Bound on waiting for a single reply
    pub connection_timeout: Duration,
    /// Largest reply accepted, in bytes
    pub max_message_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            connection_timeout: Duration::from_secs(86400),
            max_message_size: 16 * 1024 * 1024,
        }
    }
}

impl BridgeConfig {
    /// `host:port` for the editor socket
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.address(), "localhost:6400");
        assert_eq!(config.max_message_size, 16 * 1024 * 1024);
        assert_eq!(config.connection_timeout, Duration::from_secs(86400));
    }
}
