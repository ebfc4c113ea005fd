//! Domain layer for council-gate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed set of weighted members (LLMs with a role) vote independently
//! on a decision. Votes are combined by weighted confidence into a
//! super-majority verdict; the Chairman's extra weight acts as tie-breaker.
//!
//! ## Decision Tiers
//!
//! - **Autonomous** (Tier 1): small amounts are approved outright
//! - **Council** (Tier 2): mid-sized amounts go to a council vote
//! - **Human** (Tier 3): large amounts, or council deadlocks, wait for a
//!   human reply and are rejected on timeout

pub mod core;
pub mod council;
pub mod decision;
pub mod notification;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use council::{
    ConsensusSynthesizer, CouncilMember, DeliberationContext, DeliberationResult, Opinion,
    Verdict, Vote, WeightedConsensus,
};
pub use decision::{
    ApprovalOutcome, ApprovalRequest, DecisionOutcome, DecisionStatus, DecisionTier,
    DecisionType, PendingDecision, Thresholds,
};
pub use notification::{Priority, priority_for_event};
pub use prompt::CouncilPromptTemplate;
