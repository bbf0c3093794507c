//! Core configuration types and loading.

use serde::Deserialize;
use slash_proto::DEFAULT_MAX_LEN;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::router::DEFAULT_ERROR_PREFIX;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Network listen configuration.
    pub listen: ListenConfig,
    /// Router-wide error reply. Absent means the built-in responder.
    pub errors: Option<ErrorsConfig>,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Corpus for the `search` command.
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name, used in logs.
    pub name: String,
    /// Prometheus HTTP port. 0 or absent disables the endpoint.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl ServerConfig {
    /// The metrics port, if the endpoint is enabled.
    pub fn metrics_port(&self) -> Option<u16> {
        self.metrics_port.filter(|&p| p != 0)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:7070").
    pub address: SocketAddr,
    /// Longest accepted line in bytes, newline excluded.
    #[serde(default = "default_max_frame")]
    pub max_frame: usize,
}

fn default_max_frame() -> usize {
    DEFAULT_MAX_LEN
}

/// Router-level error reply configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorsConfig {
    #[serde(default = "default_error_prefix")]
    pub prefix: String,
    /// Hide error replies from everyone but the invoker.
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_error_prefix() -> String {
    DEFAULT_ERROR_PREFIX.to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Entries the `search` command completes and matches against.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_entries")]
    pub entries: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            entries: default_search_entries(),
        }
    }
}

fn default_search_entries() -> Vec<String> {
    [
        "alpha", "apple", "apricot", "banana", "beta", "cherry", "delta", "gamma", "omega",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
