//! Routing thresholds and timeouts (`[thresholds]` section)

use council_domain::Thresholds;
use serde::{Deserialize, Serialize};

/// Raw threshold configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileThresholdsConfig {
    pub auto_approve_usd: f64,
    pub council_review_usd: f64,
    pub human_required_usd: f64,
    /// Weighted-confidence fraction a side needs to carry the council
    pub consensus_required: f64,
    /// Per-member query timeout
    pub council_timeout_seconds: u64,
    pub approval_timeout_hours: u64,
    pub max_approval_timeout_hours: u64,
}

impl Default for FileThresholdsConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            auto_approve_usd: thresholds.auto_approve_usd,
            council_review_usd: thresholds.council_review_usd,
            human_required_usd: thresholds.human_required_usd,
            consensus_required: 0.66,
            council_timeout_seconds: 120,
            approval_timeout_hours: 24,
            max_approval_timeout_hours: 24,
        }
    }
}

impl FileThresholdsConfig {
    pub fn to_thresholds(&self) -> Thresholds {
        Thresholds {
            auto_approve_usd: self.auto_approve_usd,
            council_review_usd: self.council_review_usd,
            human_required_usd: self.human_required_usd,
        }
    }
}
