//! Decision tiering domain
//!
//! Amounts are routed by [`Thresholds`] to one of three [`DecisionTier`]s.
//! Decisions that reach a human become [`PendingDecision`] records that are
//! resolved exactly once.

pub mod approval;
pub mod outcome;
pub mod pending;
pub mod tier;

pub use approval::{
    ApprovalOutcome, ApprovalRequest, format_usd, is_affirmative_reply, render_approval_message,
};
pub use outcome::DecisionOutcome;
pub use pending::{DecisionStatus, DecisionType, PendingDecision};
pub use tier::{DecisionTier, Thresholds};
