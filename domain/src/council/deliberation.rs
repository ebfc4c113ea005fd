//! Deliberation outcome types

use super::opinion::Opinion;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reasoning used when no member produced a usable opinion.
pub const ALL_FAILED_REASONING: &str = "All council members failed to respond";

/// Final council verdict for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    Reject,
    NoConsensus,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approve => "approve",
            Verdict::Reject => "reject",
            Verdict::NoConsensus => "no_consensus",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one `deliberate()` call
///
/// `vote` is `Approve` or `Reject` only when `consensus` is true and
/// `confidence` reached the consensus threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationResult {
    pub consensus: bool,
    pub vote: Verdict,
    pub confidence: f64,
    pub reasoning: String,
    /// Opinions that entered synthesis (error opinions excluded)
    pub opinions: Vec<Opinion>,
    #[serde(rename = "duration_seconds", with = "duration_secs")]
    pub duration: Duration,
}

impl DeliberationResult {
    /// Non-binding result with no opinions
    pub fn no_consensus(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            consensus: false,
            vote: Verdict::NoConsensus,
            confidence,
            reasoning: reasoning.into(),
            opinions: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Every member call was unusable
    pub fn all_failed() -> Self {
        Self::no_consensus(0.0, ALL_FAILED_REASONING)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_approved(&self) -> bool {
        self.consensus && self.vote == Verdict::Approve
    }

    pub fn is_rejected(&self) -> bool {
        self.consensus && self.vote == Verdict::Reject
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
