//! Notification priorities
//!
//! Priority only selects which messaging channel a notification goes to;
//! decision logic passes it through untouched.

use serde::{Deserialize, Serialize};

/// Five-level priority, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Phone/SMS, immediate response needed
    Critical = 1,
    /// Chat, minutes
    Urgent = 2,
    /// Chat, hours
    Standard = 3,
    /// Email, days
    Async = 4,
    /// Dashboard only
    Passive = 5,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::Urgent => "URGENT",
            Priority::Standard => "STANDARD",
            Priority::Async => "ASYNC",
            Priority::Passive => "PASSIVE",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Default priority for a known event type; unknown events are `Standard`
pub fn priority_for_event(event_type: &str) -> Priority {
    match event_type {
        "security_breach" | "unauthorized_access" | "wallet_drained" | "system_compromised"
        | "emergency_shutdown" => Priority::Critical,

        "wallet_balance_low" | "transaction_failed" | "threshold_exceeded" | "council_deadlock"
        | "high_value_approval" | "legal_decision_required" | "agent_hire_approval"
        | "error_rate_high" => Priority::Urgent,

        "daily_report" | "weekly_summary" | "monthly_report" | "legal_document_review"
        | "tax_filing_reminder" | "venture_launch" => Priority::Async,

        "audit_log" | "metrics_update" | "debug_info" | "heartbeat" => Priority::Passive,

        _ => Priority::Standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_events() {
        assert_eq!(priority_for_event("security_breach"), Priority::Critical);
        assert_eq!(priority_for_event("high_value_approval"), Priority::Urgent);
        assert_eq!(priority_for_event("council_deadlock"), Priority::Urgent);
        assert_eq!(priority_for_event("council_decision"), Priority::Standard);
        assert_eq!(priority_for_event("daily_report"), Priority::Async);
        assert_eq!(priority_for_event("audit_log"), Priority::Passive);
    }

    #[test]
    fn test_unknown_event_is_standard() {
        assert_eq!(priority_for_event("something_new"), Priority::Standard);
    }

    #[test]
    fn test_ordering_most_urgent_first() {
        assert!(Priority::Critical < Priority::Urgent);
        assert!(Priority::Async < Priority::Passive);
        assert_eq!(Priority::Urgent as u8, 2);
    }

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Priority::Urgent).unwrap(), "\"URGENT\"");
    }
}
