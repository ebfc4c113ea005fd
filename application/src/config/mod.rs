//! Application-level configuration.
//!
//! - [`CouncilConfig`]: council membership, consensus threshold, member timeout
//! - [`DecisionConfig`]: tier thresholds and human approval timeouts

pub mod council_config;
pub mod decision_config;

pub use council_config::CouncilConfig;
pub use decision_config::{DecisionConfig, MAX_APPROVAL_TIMEOUT_HOURS};
