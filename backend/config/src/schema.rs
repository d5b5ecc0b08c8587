//! Preview server configuration schema.
//!
//! Typed for serde YAML deserialization; every field has a default so a
//! missing config file means a fully usable configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration for the preview server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct MarkPreviewConfig {
    /// HTTP server bind address.
    pub bind_address: String,
    /// HTTP server port.
    pub port: u16,
    /// Directory the client page is served from.
    pub static_dir: String,
    /// Directory for rolling log files.
    pub log_dir: String,
    /// Default log level when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for MarkPreviewConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "./static".to_string(),
            log_dir: "./logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl MarkPreviewConfig {
    /// The socket address the gateway binds to.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {addr:?}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_to_a_socket_addr() {
        let config = MarkPreviewConfig::default();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_partial_yaml_fills_in_defaults() {
        let config: MarkPreviewConfig = serde_yaml::from_str("port: 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.static_dir, "./static");
    }

    #[test]
    fn test_bad_bind_address_is_an_error() {
        let config = MarkPreviewConfig {
            bind_address: "not an address".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
