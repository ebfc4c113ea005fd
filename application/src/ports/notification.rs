//! Notification hub port
//!
//! Outbound messages to human-facing channels. A notification may ask for
//! a reply; the hub either returns it inline or routes it back later
//! through [`HumanApprovalGate::respond`](crate::use_cases::request_approval::HumanApprovalGate::respond).

use async_trait::async_trait;
use council_domain::{Priority, priority_for_event};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Error, Debug, Clone)]
pub enum NotificationError {
    #[error("No channel available for priority {0}")]
    NoChannel(Priority),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

/// A message for the notification hub
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub event_type: String,
    pub message: String,
    /// Structured payload (e.g. the pending decision record)
    pub context: Value,
    pub priority: Priority,
    pub require_response: bool,
    pub timeout_hours: u64,
}

impl Notification {
    /// Notification with the default priority for its event type
    pub fn event(event_type: impl Into<String>, message: impl Into<String>) -> Self {
        let event_type = event_type.into();
        let priority = priority_for_event(&event_type);
        Self {
            event_type,
            message: message.into(),
            context: Value::Null,
            priority,
            require_response: false,
            timeout_hours: 0,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Ask the recipient for a reply within `timeout_hours`
    pub fn requesting_response(mut self, timeout_hours: u64) -> Self {
        self.require_response = true;
        self.timeout_hours = timeout_hours;
        self
    }
}

/// Port for sending notifications.
///
/// # Returns
///
/// * `Ok(Some(reply))` - the channel collected a reply inline
/// * `Ok(None)` - delivered; any reply arrives later by decision id
/// * `Err(_)` - delivery failed; a pending wait still runs to its timeout
#[async_trait]
pub trait NotificationHub: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<Option<String>, NotificationError>;
}
