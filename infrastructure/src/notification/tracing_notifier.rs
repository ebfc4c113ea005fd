//! Notification channel that writes to the tracing log.
//!
//! Useful for unattended runs: approval requests are logged and any reply
//! must come back through `HumanApprovalGate::respond`, otherwise the
//! request times out and is rejected.

use async_trait::async_trait;
use council_application::ports::notification::{Notification, NotificationError, NotificationHub};
use council_domain::Priority;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationHub for TracingNotifier {
    async fn send(&self, notification: Notification) -> Result<Option<String>, NotificationError> {
        let Notification {
            event_type,
            message,
            priority,
            require_response,
            timeout_hours,
            ..
        } = notification;

        match priority {
            Priority::Critical => error!(
                event = %event_type,
                priority = %priority,
                require_response,
                timeout_hours,
                "{}",
                message
            ),
            Priority::Urgent => warn!(
                event = %event_type,
                priority = %priority,
                require_response,
                timeout_hours,
                "{}",
                message
            ),
            _ => info!(
                event = %event_type,
                priority = %priority,
                require_response,
                timeout_hours,
                "{}",
                message
            ),
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_replies_inline() {
        let notifier = TracingNotifier::new();
        let reply = notifier
            .send(
                Notification::event("high_value_approval", "APPROVAL REQUIRED")
                    .requesting_response(24),
            )
            .await
            .unwrap();
        assert!(reply.is_none());
    }
}
