//! Final answer of the decision router

use super::tier::DecisionTier;
use crate::council::DeliberationResult;
use serde::{Deserialize, Serialize};

pub const AUTO_APPROVED_REASON: &str = "Auto-approved (under threshold)";

/// Fallback when the human channel returns no comment.
pub const HUMAN_DECISION_REASON: &str = "Human decision";

/// `(approved, reason)` plus the tier that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub approved: bool,
    pub reason: String,
    /// Tier whose answer is final
    pub tier: DecisionTier,
    /// Council round, when the council was consulted (binding or advisory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliberation: Option<DeliberationResult>,
}

impl DecisionOutcome {
    pub fn autonomous() -> Self {
        Self {
            approved: true,
            reason: AUTO_APPROVED_REASON.to_string(),
            tier: DecisionTier::Autonomous,
            deliberation: None,
        }
    }

    pub fn council_approved(result: DeliberationResult) -> Self {
        Self {
            approved: true,
            reason: format!("Council approved ({:.0}% confidence)", result.confidence * 100.0),
            tier: DecisionTier::Council,
            deliberation: Some(result),
        }
    }

    pub fn council_rejected(result: DeliberationResult) -> Self {
        Self {
            approved: false,
            reason: format!("Council rejected: {}", result.reasoning),
            tier: DecisionTier::Council,
            deliberation: Some(result),
        }
    }

    /// Human answer; an empty comment becomes "Human decision"
    pub fn human(
        approved: bool,
        comment: impl Into<String>,
        deliberation: Option<DeliberationResult>,
    ) -> Self {
        let comment = comment.into();
        let reason = if comment.trim().is_empty() {
            HUMAN_DECISION_REASON.to_string()
        } else {
            comment
        };
        Self {
            approved,
            reason,
            tier: DecisionTier::Human,
            deliberation,
        }
    }
}
