//! Port for the decision audit trail.
//!
//! Defines the [`AuditLog`] trait for recording decision lifecycle events
//! (`decision_made`, `approval_requested`, `decision_resolved`) to a
//! structured, append-only log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record of every decision (JSONL).

use chrono::{DateTime, Utc};
use serde_json::Value;

pub const DECISION_MADE: &str = "decision_made";
pub const APPROVAL_REQUESTED: &str = "approval_requested";
pub const DECISION_RESOLVED: &str = "decision_resolved";

/// A structured audit event.
pub struct AuditEvent {
    /// Event type identifier (one of the constants above).
    pub event_type: &'static str,
    pub timestamp: DateTime<Utc>,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    /// Create a new audit event with the current UTC timestamp.
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Port for appending audit events.
///
/// `record` is synchronous and non-fallible: a broken audit sink must not
/// change a decision. Implementations report their own failures.
pub trait AuditLog: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditLog;

impl AuditLog for NoAuditLog {
    fn record(&self, _event: AuditEvent) {}
}
