//! Pending decisions awaiting a binding response

use super::approval::ApprovalRequest;
use crate::core::error::DomainError;
use crate::council::Verdict;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Category of a decision escalated to a human
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionType {
    Financial,
    Operational,
    Legal,
    Strategic,
}

impl DecisionType {
    /// `Financial` when money is involved, otherwise `Operational`
    pub fn for_amount(amount: f64) -> Self {
        if amount > 0.0 {
            DecisionType::Financial
        } else {
            DecisionType::Operational
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Financial => "financial",
            DecisionType::Operational => "operational",
            DecisionType::Legal => "legal",
            DecisionType::Strategic => "strategic",
        }
    }
}

impl std::fmt::Display for DecisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "financial" => Ok(DecisionType::Financial),
            "operational" => Ok(DecisionType::Operational),
            "legal" => Ok(DecisionType::Legal),
            "strategic" => Ok(DecisionType::Strategic),
            other => Err(DomainError::UnknownDecisionType(other.to_string())),
        }
    }
}

/// Lifecycle status; `Pending` is the only non-terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Pending,
    Approved,
    Rejected,
    Timeout,
}

impl DecisionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DecisionStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "pending",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DecisionStatus::Pending),
            "approved" => Ok(DecisionStatus::Approved),
            "rejected" => Ok(DecisionStatus::Rejected),
            "timeout" => Ok(DecisionStatus::Timeout),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// A decision awaiting a human reply or timeout
///
/// Created in `Pending`, moved to a terminal status exactly once and then
/// kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub id: String,
    pub decision_type: DecisionType,
    pub action: String,
    pub amount: Option<f64>,
    pub reason: String,
    /// Advisory council vote, when the council was consulted first
    pub council_recommendation: Option<Verdict>,
    pub council_confidence: Option<f64>,
    pub status: DecisionStatus,
    pub created_at: DateTime<Utc>,
    pub timeout_hours: u64,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by: Option<String>,
    /// Raw reply text from the responder
    pub response: Option<String>,
}

impl PendingDecision {
    pub fn new(id: impl Into<String>, request: &ApprovalRequest) -> Self {
        Self {
            id: id.into(),
            decision_type: request.decision_type,
            action: request.action.clone(),
            amount: request.amount,
            reason: request.reason.clone(),
            council_recommendation: request.council_recommendation,
            council_confidence: request.council_confidence,
            status: DecisionStatus::Pending,
            created_at: Utc::now(),
            timeout_hours: request.timeout_hours,
            responded_at: None,
            responded_by: None,
            response: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == DecisionStatus::Pending
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let hours = i64::try_from(self.timeout_hours).unwrap_or(i64::MAX);
        let timeout = Duration::try_hours(hours).unwrap_or(Duration::MAX);
        self.created_at
            .checked_add_signed(timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the decision is past its deadline at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Move to a terminal status.
    ///
    /// Fails without touching the record when the decision is already
    /// terminal or `status` is `Pending`.
    pub fn resolve(
        &mut self,
        status: DecisionStatus,
        responder: impl Into<String>,
        response: Option<String>,
    ) -> Result<(), DomainError> {
        if !status.is_terminal() {
            return Err(DomainError::NonTerminalResolution);
        }
        if self.status.is_terminal() {
            return Err(DomainError::AlreadyResolved {
                id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        self.status = status;
        self.responded_at = Some(Utc::now());
        self.responded_by = Some(responder.into());
        self.response = response;
        Ok(())
    }
}
