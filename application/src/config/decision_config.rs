//! Decision routing and approval-wait parameters.

use council_domain::Thresholds;

/// Hours a human approval wait may last at most.
pub const MAX_APPROVAL_TIMEOUT_HOURS: u64 = 24;

/// Parameters for the decision router and the human approval gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionConfig {
    pub thresholds: Thresholds,
    /// Requested wait for a human reply.
    pub approval_timeout_hours: u64,
    /// Upper bound applied to every wait, whatever was requested.
    pub max_approval_timeout_hours: u64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            approval_timeout_hours: 24,
            max_approval_timeout_hours: MAX_APPROVAL_TIMEOUT_HOURS,
        }
    }
}

impl DecisionConfig {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_approval_timeout_hours(mut self, hours: u64) -> Self {
        self.approval_timeout_hours = hours;
        self
    }

    /// Requested hours clamped to the configured maximum
    pub fn capped_timeout_hours(&self, requested: u64) -> u64 {
        requested.min(self.max_approval_timeout_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_capped() {
        let config = DecisionConfig::default();
        assert_eq!(config.capped_timeout_hours(72), 24);
        assert_eq!(config.capped_timeout_hours(4), 4);
    }
}
