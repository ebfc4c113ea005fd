//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! [`FileConfig::validate`] checks them eagerly, after which the typed
//! application configs can be built without further checks.

mod council;
mod gateway;
mod observability;
mod thresholds;

pub use council::{FileCouncilConfig, FileMemberConfig};
pub use gateway::{DEFAULT_BASE_URL, FileGatewayConfig};
pub use observability::{DEFAULT_PROMETHEUS_PORT, FileLoggingConfig, FileMetricsConfig};
pub use thresholds::FileThresholdsConfig;

use council_application::{CouncilConfig, DecisionConfig};
use council_domain::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("consensus_required must be in (0, 1], got {0}")]
    InvalidConsensus(f64),

    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("approval_timeout_hours ({requested}) exceeds max_approval_timeout_hours ({max})")]
    TimeoutAboveMaximum { requested: u64, max: u64 },

    #[error("invalid council member: {0}")]
    InvalidMember(String),

    #[error("council is empty and use_default_council is false")]
    EmptyCouncil,

    #[error("gateway.base_url cannot be empty")]
    EmptyBaseUrl,
}

impl From<DomainError> for ConfigValidationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidThresholds(msg) => ConfigValidationError::InvalidThresholds(msg),
            DomainError::InvalidMember(msg) => ConfigValidationError::InvalidMember(msg),
            DomainError::InvalidConsensusThreshold(value) => {
                ConfigValidationError::InvalidConsensus(value)
            }
            other => ConfigValidationError::InvalidMember(other.to_string()),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completion endpoint settings
    pub gateway: FileGatewayConfig,
    /// Council membership
    pub council: FileCouncilConfig,
    /// Routing thresholds and timeouts
    pub thresholds: FileThresholdsConfig,
    pub metrics: FileMetricsConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    ///
    /// The API key is not checked here: `show-config` must work without
    /// one. The gateway refuses to build without it.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.thresholds.to_thresholds().validate()?;

        let consensus = self.thresholds.consensus_required;
        if !(consensus > 0.0 && consensus <= 1.0) {
            return Err(ConfigValidationError::InvalidConsensus(consensus));
        }

        if self.thresholds.council_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "council_timeout_seconds",
            ));
        }
        if self.thresholds.approval_timeout_hours == 0 {
            return Err(ConfigValidationError::InvalidTimeout("approval_timeout_hours"));
        }
        if self.thresholds.max_approval_timeout_hours == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "max_approval_timeout_hours",
            ));
        }
        if self.thresholds.approval_timeout_hours > self.thresholds.max_approval_timeout_hours {
            return Err(ConfigValidationError::TimeoutAboveMaximum {
                requested: self.thresholds.approval_timeout_hours,
                max: self.thresholds.max_approval_timeout_hours,
            });
        }

        for member in self.council.to_members() {
            member.validate()?;
        }
        if self.council.members.is_empty() && !self.council.use_default_council {
            return Err(ConfigValidationError::EmptyCouncil);
        }

        if self.gateway.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        Ok(())
    }

    /// Build the council parameters
    pub fn council_config(&self) -> CouncilConfig {
        let config = CouncilConfig {
            temperature: self.gateway.temperature,
            max_tokens: self.gateway.max_tokens,
            ..CouncilConfig::default()
        }
        .with_members(self.council.to_members())
        .with_consensus_threshold(self.thresholds.consensus_required)
        .with_member_timeout(Duration::from_secs(
            self.thresholds.council_timeout_seconds,
        ));

        if self.council.use_default_council {
            config
        } else {
            config.without_default_council()
        }
    }

    /// Build the routing and approval-wait parameters
    pub fn decision_config(&self) -> DecisionConfig {
        DecisionConfig {
            thresholds: self.thresholds.to_thresholds(),
            approval_timeout_hours: self.thresholds.approval_timeout_hours,
            max_approval_timeout_hours: self.thresholds.max_approval_timeout_hours,
        }
    }
}
