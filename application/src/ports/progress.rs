//! Progress notification port
//!
//! Defines the interface for reporting progress during a council round.

use council_domain::{CouncilMember, DeliberationResult, Opinion};

/// Callback for progress updates during deliberation
///
/// Implementations live in the presentation layer (spinner, progress bar).
pub trait DeliberationProgress: Send + Sync {
    /// Called before member queries go out
    fn on_deliberation_start(&self, question: &str, members: &[CouncilMember]);

    /// Called as each member's opinion settles (any vote, including error)
    fn on_opinion(&self, opinion: &Opinion);

    /// Called once with the final result
    fn on_deliberation_complete(&self, result: &DeliberationResult);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DeliberationProgress for NoProgress {
    fn on_deliberation_start(&self, _question: &str, _members: &[CouncilMember]) {}
    fn on_opinion(&self, _opinion: &Opinion) {}
    fn on_deliberation_complete(&self, _result: &DeliberationResult) {}
}
