//! Application layer for council-gate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{CouncilConfig, DecisionConfig};
pub use ports::{
    audit_log::{AuditEvent, AuditLog, NoAuditLog},
    council::CouncilPort,
    decision_store::{InMemoryDecisionStore, PendingDecisionStore},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    metrics::{CompositeMetrics, DecisionCounters, DecisionMetrics, MetricsSink, NoMetrics},
    notification::{Notification, NotificationError, NotificationHub},
    progress::{DeliberationProgress, NoProgress},
};
pub use use_cases::collect_opinions::{MemberOutcome, OpinionCollector};
pub use use_cases::deliberate::{CouncilError, CouncilProtocol};
pub use use_cases::make_decision::DecisionRouter;
pub use use_cases::request_approval::HumanApprovalGate;
