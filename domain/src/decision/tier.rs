//! Decision tiers and dollar thresholds

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Escalation level used to answer a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionTier {
    /// Tier 1: approved without consultation
    Autonomous,
    /// Tier 2: weighted council vote
    Council,
    /// Tier 3: binding human response
    Human,
}

impl DecisionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionTier::Autonomous => "autonomous",
            DecisionTier::Council => "council",
            DecisionTier::Human => "human",
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            DecisionTier::Autonomous => 1,
            DecisionTier::Council => 2,
            DecisionTier::Human => 3,
        }
    }
}

impl std::fmt::Display for DecisionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dollar thresholds for tier routing
///
/// Only `auto_approve_usd` and `human_required_usd` affect routing:
/// the council covers the whole band between them. `council_review_usd`
/// is validated for ordering and reported, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub auto_approve_usd: f64,
    pub council_review_usd: f64,
    pub human_required_usd: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto_approve_usd: 100.0,
            council_review_usd: 500.0,
            human_required_usd: 2000.0,
        }
    }
}

impl Thresholds {
    /// Require `auto_approve_usd < council_review_usd <= human_required_usd`
    pub fn validate(&self) -> Result<(), DomainError> {
        let values = [
            self.auto_approve_usd,
            self.council_review_usd,
            self.human_required_usd,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::InvalidThresholds(
                "thresholds must be finite numbers".to_string(),
            ));
        }
        if self.auto_approve_usd >= self.council_review_usd {
            return Err(DomainError::InvalidThresholds(format!(
                "auto_approve_usd ({}) must be below council_review_usd ({})",
                self.auto_approve_usd, self.council_review_usd
            )));
        }
        if self.council_review_usd > self.human_required_usd {
            return Err(DomainError::InvalidThresholds(format!(
                "council_review_usd ({}) must not exceed human_required_usd ({})",
                self.council_review_usd, self.human_required_usd
            )));
        }
        Ok(())
    }

    /// Pick the tier for an amount.
    ///
    /// Tier 1 has an exclusive upper bound, so an amount equal to
    /// `auto_approve_usd` goes to the council. A NaN amount compares false
    /// everywhere and lands on the human tier.
    pub fn route(&self, amount: f64) -> DecisionTier {
        if amount < self.auto_approve_usd {
            DecisionTier::Autonomous
        } else if amount < self.human_required_usd {
            DecisionTier::Council
        } else {
            DecisionTier::Human
        }
    }
}
