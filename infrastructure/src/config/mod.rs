//! Configuration file loading for council-gate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_GATE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council-gate.toml`
//! 4. Global: `$XDG_CONFIG_HOME/council-gate/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_PROMETHEUS_PORT, FileConfig,
    FileCouncilConfig, FileGatewayConfig, FileLoggingConfig, FileMemberConfig, FileMetricsConfig,
    FileThresholdsConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
