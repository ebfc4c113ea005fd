//! Council configuration: who votes and how long they get.

use council_domain::CouncilMember;
use council_domain::prompt::{MEMBER_MAX_TOKENS, MEMBER_TEMPERATURE};
use std::time::Duration;

/// Parameters for building a [`CouncilProtocol`](crate::use_cases::deliberate::CouncilProtocol).
#[derive(Debug, Clone)]
pub struct CouncilConfig {
    /// Configured members; empty means "use the default council" when
    /// `use_default_council` is set.
    pub members: Vec<CouncilMember>,
    pub use_default_council: bool,
    /// Weighted-confidence fraction required on one side, in (0, 1].
    pub consensus_threshold: f64,
    /// Per-member query timeout.
    pub member_timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            use_default_council: true,
            consensus_threshold: 0.66,
            member_timeout: Duration::from_secs(120),
            temperature: MEMBER_TEMPERATURE,
            max_tokens: MEMBER_MAX_TOKENS,
        }
    }
}

impl CouncilConfig {
    // ==================== Builder Methods ====================

    pub fn with_members(mut self, members: Vec<CouncilMember>) -> Self {
        self.members = members;
        self
    }

    pub fn without_default_council(mut self) -> Self {
        self.use_default_council = false;
        self
    }

    pub fn with_consensus_threshold(mut self, threshold: f64) -> Self {
        self.consensus_threshold = threshold;
        self
    }

    pub fn with_member_timeout(mut self, timeout: Duration) -> Self {
        self.member_timeout = timeout;
        self
    }

    /// Members that will actually vote
    pub fn effective_members(&self) -> Vec<CouncilMember> {
        if self.members.is_empty() && self.use_default_council {
            CouncilMember::default_council()
        } else {
            self.members.clone()
        }
    }
}
