//! Metrics and log-file configuration (`[metrics]`, `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PROMETHEUS_PORT: u16 = 9090;

/// Raw metrics configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMetricsConfig {
    /// Serve a Prometheus scrape endpoint
    pub prometheus_enabled: bool,
    pub prometheus_port: u16,
}

impl Default for FileMetricsConfig {
    fn default() -> Self {
        Self {
            prometheus_enabled: false,
            prometheus_port: DEFAULT_PROMETHEUS_PORT,
        }
    }
}

impl FileMetricsConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.prometheus_port)
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write tracing output to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Append decision audit events (JSONL) to this file
    pub audit_file: Option<PathBuf>,
}
