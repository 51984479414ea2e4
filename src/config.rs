//! Application configuration.
//!
//! # Example
//!
//! ```rust
//! use railways::config::{Config, WebConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.web.port, 9000);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_web(WebConfig::default().with_port(3000).with_cors(false));
//! assert_eq!(config.web.socket_addr().port(), 3000);
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Default listen port
pub const DEFAULT_PORT: u16 = 9000;

/// Default `tracing` filter directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "railways=info,tower_http=info";

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web server configuration
    pub web: WebConfig,
    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Set web configuration
    pub fn with_web(mut self, web: WebConfig) -> Self {
        self.web = web;
        self
    }

    /// Set logging configuration
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

// ============================================================================
// Web Config
// ============================================================================

/// Web server configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address to bind to
    pub bind: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
    /// Largest accepted request body in bytes
    pub body_limit_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_permissive: true,
            body_limit_bytes: 16 * 1024,
        }
    }
}

impl WebConfig {
    /// Set the bind address
    pub fn with_bind(mut self, bind: IpAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS mode
    pub fn with_cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Set the request body limit
    pub fn with_body_limit_bytes(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }

    /// Socket address the server listens on
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

// ============================================================================
// Log Config
// ============================================================================

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl LogConfig {
    /// Set the fallback filter directive
    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = filter.to_owned();
        self
    }
}
