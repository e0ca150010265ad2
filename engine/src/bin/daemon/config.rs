//! Daemon configuration from environment variables
//!
//! All configuration is read from environment variables with sensible
//! defaults, so the daemon needs no command-line argument parsing.

use std::env;
use std::net::SocketAddr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4242;
const DEFAULT_PROTOCOL: &str = "tcp";
const DEFAULT_CONSOLE: bool = false;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Daemon configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Bind host for the control surface
    pub host: String,

    /// Bind port for the control surface
    pub port: u16,

    /// Wire protocol; only "tcp" is supported
    pub protocol: String,

    /// Run the interactive console alongside the server
    pub console: bool,

    /// Log level
    pub log_level: String,
}

impl DaemonConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("SM_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: Self::parse_u16("SM_PORT").unwrap_or(DEFAULT_PORT),
            protocol: env::var("SM_PROTOCOL").unwrap_or_else(|_| DEFAULT_PROTOCOL.to_string()),
            console: Self::parse_bool("SM_CONSOLE", DEFAULT_CONSOLE),
            log_level: Self::parse_log_level(),
        }
    }

    fn parse_u16(var: &str) -> Option<u16> {
        env::var(var).ok().and_then(|s| s.parse().ok())
    }

    fn parse_bool(var: &str, default: bool) -> bool {
        env::var(var)
            .ok()
            .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }

    fn parse_log_level() -> String {
        env::var("SM_LOG_LEVEL")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
    }

    /// Socket address to bind the gRPC server on
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid bind address {}:{}: {}", self.host, self.port, e))
    }

    /// Reject configurations the daemon cannot honor
    pub fn validate(&self) -> Result<(), String> {
        if self.protocol != "tcp" {
            return Err(format!(
                "unsupported protocol {:?}; only \"tcp\" is available",
                self.protocol
            ));
        }
        self.bind_addr()?;
        Ok(())
    }
}
