//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit_log;
pub mod council;
pub mod decision_store;
pub mod llm_gateway;
pub mod metrics;
pub mod notification;
pub mod progress;
