//! Opinion types for council deliberation
//!
//! One [`Opinion`] is produced per member per deliberation round and is
//! never mutated afterwards.

use super::member::CouncilMember;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reasoning recorded when a member does not answer in time.
pub const TIMEOUT_REASONING: &str = "Timeout - no response";

/// A member's vote on a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Approve,
    Reject,
    /// Explicit non-vote; also used for timeouts
    Abstain,
    /// Sentinel for an unusable member call; excluded before synthesis
    Error,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Approve => "approve",
            Vote::Reject => "reject",
            Vote::Abstain => "abstain",
            Vote::Error => "error",
        }
    }

    /// Whether this vote carries weight in the consensus arithmetic
    pub fn is_decisive(&self) -> bool {
        matches!(self, Vote::Approve | Vote::Reject)
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Vote {
    type Err = DomainError;

    /// Parse a vote as a member would write it.
    ///
    /// `error` is never accepted from a model: it is reserved for failed calls.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" => Ok(Vote::Approve),
            "reject" => Ok(Vote::Reject),
            "abstain" => Ok(Vote::Abstain),
            other => Err(DomainError::UnknownVote(other.to_string())),
        }
    }
}

/// One member's independent judgment on one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub member: CouncilMember,
    pub vote: Vote,
    /// Confidence level (0.0 to 1.0)
    pub confidence: f64,
    pub reasoning: String,
    pub timestamp: DateTime<Utc>,
}

impl Opinion {
    /// Create an opinion; confidence is clamped to [0, 1]
    pub fn new(
        member: CouncilMember,
        vote: Vote,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            member,
            vote,
            confidence,
            reasoning: reasoning.into(),
            timestamp: Utc::now(),
        }
    }

    /// Abstention recorded when the member's call exceeded its timeout
    pub fn timed_out(member: CouncilMember) -> Self {
        Self::new(member, Vote::Abstain, 0.0, TIMEOUT_REASONING)
    }

    /// Error sentinel for a failed or unparseable call
    pub fn failed(member: CouncilMember, detail: impl Into<String>) -> Self {
        Self::new(member, Vote::Error, 0.0, detail)
    }

    pub fn is_error(&self) -> bool {
        self.vote == Vote::Error
    }

    /// `weight × confidence`, the amount this opinion adds to its side
    pub fn weighted_confidence(&self) -> f64 {
        self.member.weight() * self.confidence
    }
}
