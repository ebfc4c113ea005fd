//! Infrastructure layer for council-gate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod notification;
pub mod observability;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use gateway::OpenAiCompatibleGateway;
pub use logging::JsonlAuditLog;
pub use notification::TracingNotifier;
pub use observability::{PrometheusMetricsSink, start_prometheus_exporter};
