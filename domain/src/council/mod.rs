//! Council deliberation domain
//!
//! A fixed set of weighted members votes independently on a question;
//! the usable opinions are combined into a weighted super-majority verdict.
//!
//! - [`CouncilMember`]: model id, role and voting weight
//! - [`Opinion`]: one member's vote, confidence and reasoning
//! - [`WeightedConsensus`]: the [`ConsensusSynthesizer`] used in production
//! - [`DeliberationResult`]: the verdict of one round

pub mod consensus;
pub mod context;
pub mod deliberation;
pub mod member;
pub mod opinion;
pub mod parsing;

pub use consensus::{ConsensusSynthesizer, WeightedConsensus, WeightedTally};
pub use context::DeliberationContext;
pub use deliberation::{DeliberationResult, Verdict};
pub use member::CouncilMember;
pub use opinion::{Opinion, Vote};
pub use parsing::parse_opinion;
