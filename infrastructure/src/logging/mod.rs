//! Logging infrastructure: the structured decision audit trail.
//!
//! Provides [`JsonlAuditLog`], a JSONL file writer that implements
//! the [`AuditLog`](council_application::AuditLog) port.

mod jsonl_audit_log;

pub use jsonl_audit_log::JsonlAuditLog;
