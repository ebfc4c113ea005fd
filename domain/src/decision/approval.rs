//! Human approval requests and replies

use super::pending::{DecisionType, PendingDecision};
use crate::council::Verdict;
use serde::{Deserialize, Serialize};

/// Notification event type for approval requests.
pub const APPROVAL_EVENT: &str = "high_value_approval";

/// Reason used when the caller gives none.
pub const DEFAULT_HUMAN_REASON: &str = "Requires human approval";

/// Comment returned when nobody answered in time.
pub const TIMEOUT_COMMENT: &str = "Timeout - auto-rejected";

/// Responder recorded for timeout and shutdown resolutions.
pub const SYSTEM_RESPONDER: &str = "system";

/// Amounts above this are sent with elevated priority.
pub const URGENT_AMOUNT_USD: f64 = 2000.0;

/// Replies that count as approval (after trim + lowercase)
const AFFIRMATIVE_REPLIES: [&str; 6] = ["approve", "approved", "yes", "ok", "y", "1"];

/// Whether a human reply approves the decision.
///
/// Anything outside the fixed vocabulary is a rejection.
pub fn is_affirmative_reply(reply: &str) -> bool {
    let normalized = reply.trim().to_lowercase();
    AFFIRMATIVE_REPLIES.contains(&normalized.as_str())
}

/// Input to the human approval gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub decision_type: DecisionType,
    pub action: String,
    pub amount: Option<f64>,
    pub reason: String,
    pub council_recommendation: Option<Verdict>,
    pub council_confidence: Option<f64>,
    pub timeout_hours: u64,
}

impl ApprovalRequest {
    pub fn new(decision_type: DecisionType, action: impl Into<String>) -> Self {
        Self {
            decision_type,
            action: action.into(),
            amount: None,
            reason: DEFAULT_HUMAN_REASON.to_string(),
            council_recommendation: None,
            council_confidence: None,
            timeout_hours: 24,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Attach the council's non-binding vote
    pub fn with_council_advice(mut self, recommendation: Verdict, confidence: f64) -> Self {
        self.council_recommendation = Some(recommendation);
        self.council_confidence = Some(confidence);
        self
    }

    pub fn with_timeout_hours(mut self, hours: u64) -> Self {
        self.timeout_hours = hours;
        self
    }

    /// Large amounts warrant an urgent notification
    pub fn is_urgent(&self) -> bool {
        self.amount.is_some_and(|a| a > URGENT_AMOUNT_USD)
    }
}

/// What the gate returns to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    pub approved: bool,
    /// Raw human reply, or [`TIMEOUT_COMMENT`]
    pub comment: String,
}

impl ApprovalOutcome {
    /// Derive the outcome from a resolved record
    pub fn from_decision(decision: &PendingDecision) -> Self {
        use super::pending::DecisionStatus;

        let approved = decision.status == DecisionStatus::Approved;
        let comment = match (decision.status, &decision.response) {
            (DecisionStatus::Approved | DecisionStatus::Rejected, Some(reply)) => reply.clone(),
            _ => TIMEOUT_COMMENT.to_string(),
        };
        Self { approved, comment }
    }
}

/// Format dollars as `$1,234.56`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Message body sent to the human channel
pub fn render_approval_message(decision: &PendingDecision) -> String {
    let amount = decision
        .amount
        .map(format_usd)
        .unwrap_or_else(|| "N/A".to_string());
    let council = decision
        .council_recommendation
        .map(|v| v.to_string())
        .unwrap_or_else(|| "Not consulted".to_string());
    let confidence = decision
        .council_confidence
        .map(|c| format!("{:.0}%", c * 100.0))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "APPROVAL REQUIRED\n\
         \n\
         ID: {id}\n\
         Type: {kind}\n\
         Action: {action}\n\
         Amount: {amount}\n\
         Reason: {reason}\n\
         \n\
         Council: {council}\n\
         Confidence: {confidence}\n\
         \n\
         Auto-reject in {hours}h if no response\n\
         \n\
         Reply: APPROVE / REJECT",
        id = decision.id,
        kind = decision.decision_type,
        action = decision.action,
        reason = decision.reason,
        hours = decision.timeout_hours,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::pending::DecisionStatus;

    #[test]
    fn test_affirmative_vocabulary() {
        for reply in ["approve", "APPROVED", " Yes ", "ok", "Y", "1"] {
            assert!(is_affirmative_reply(reply), "{reply:?} should approve");
        }
        for reply in ["reject", "no", "approve it", "", "0", "yep"] {
            assert!(!is_affirmative_reply(reply), "{reply:?} should reject");
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1234.56), "$1,234.56");
        assert_eq!(format_usd(5000.0), "$5,000.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567.00");
        assert_eq!(format_usd(-42.0), "-$42.00");
    }

    #[test]
    fn test_urgency() {
        let request = ApprovalRequest::new(DecisionType::Financial, "x");
        assert!(!request.is_urgent());
        assert!(!request.clone().with_amount(2000.0).is_urgent());
        assert!(request.with_amount(2000.01).is_urgent());
    }

    #[test]
    fn test_render_message_with_council_advice() {
        let request = ApprovalRequest::new(DecisionType::Financial, "buy ads")
            .with_amount(1500.0)
            .with_reason("new channel")
            .with_council_advice(Verdict::NoConsensus, 0.55)
            .with_timeout_hours(12);
        let decision = PendingDecision::new("d1", &request);

        let message = render_approval_message(&decision);
        assert!(message.contains("ID: d1"));
        assert!(message.contains("Type: financial"));
        assert!(message.contains("Amount: $1,500.00"));
        assert!(message.contains("Reason: new channel"));
        assert!(message.contains("Council: no_consensus"));
        assert!(message.contains("Confidence: 55%"));
        assert!(message.contains("Auto-reject in 12h"));
        assert!(message.ends_with("Reply: APPROVE / REJECT"));
    }

    #[test]
    fn test_render_message_without_council() {
        let request = ApprovalRequest::new(DecisionType::Operational, "restart service");
        let message = render_approval_message(&PendingDecision::new("d2", &request));
        assert!(message.contains("Amount: N/A"));
        assert!(message.contains("Council: Not consulted"));
        assert!(message.contains("Confidence: N/A"));
        assert!(message.contains("Reason: Requires human approval"));
    }

    #[test]
    fn test_outcome_from_decision() {
        let request = ApprovalRequest::new(DecisionType::Financial, "x");
        let mut decision = PendingDecision::new("d3", &request);
        decision
            .resolve(DecisionStatus::Rejected, "bob", Some("nope".to_string()))
            .unwrap();
        let outcome = ApprovalOutcome::from_decision(&decision);
        assert!(!outcome.approved);
        assert_eq!(outcome.comment, "nope");

        let mut timed_out = PendingDecision::new("d4", &request);
        timed_out
            .resolve(DecisionStatus::Timeout, SYSTEM_RESPONDER, None)
            .unwrap();
        let outcome = ApprovalOutcome::from_decision(&timed_out);
        assert!(!outcome.approved);
        assert_eq!(outcome.comment, TIMEOUT_COMMENT);
    }
}
