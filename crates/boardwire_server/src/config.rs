//! Server configuration from an optional TOML file and the environment.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "BOARDWIRE_HOST";
/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "BOARDWIRE_PORT";

/// Default port the server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,

    /// TCP port to bind.
    port: u16,

    /// Pending commands each match task buffers.
    command_capacity: usize,

    /// Seconds a new connection has to send its sync request.
    sync_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            command_capacity: 64,
            sync_timeout_secs: 5,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading server config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves configuration: the file if given, then environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env()
    }

    /// Applies `BOARDWIRE_HOST` and `BOARDWIRE_PORT` when set.
    #[instrument(skip(self))]
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = std::env::var(HOST_ENV) {
            debug!(%host, "Using host from environment");
            self.host = host;
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.port = port.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} value {:?}: {}", PORT_ENV, port, e))
            })?;
            debug!(port = self.port, "Using port from environment");
        }
        Ok(self)
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Handshake deadline for new connections.
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    /// Parses the bind address.
    #[instrument(skip(self), fields(host = %self.host, port = self.port))]
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e| {
            warn!(%addr, "Unparseable bind address");
            ConfigError::new(format!("Invalid bind address {}: {}", addr, e))
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listens_on_8000() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8000");
        assert_eq!(config.sync_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::default().with_host("0.0.0.0").with_port(9001);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 9001);
    }

    #[test]
    fn test_bad_address_reports_location() {
        let err = ServerConfig::default()
            .with_host("not an address")
            .socket_addr()
            .unwrap_err();
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().starts_with("Config error: Invalid bind address"));
    }
}
