//! Council port
//!
//! What the decision router needs from a council. The production
//! implementation is [`CouncilProtocol`](crate::use_cases::deliberate::CouncilProtocol).

use async_trait::async_trait;
use council_domain::{DeliberationContext, DeliberationResult};

#[async_trait]
pub trait CouncilPort: Send + Sync {
    /// Run one round. Member failures are folded into the result; this
    /// never fails.
    async fn deliberate(&self, question: &str, context: &DeliberationContext) -> DeliberationResult;
}
