//! Human Approval Gate
//!
//! Registers a pending decision, notifies a human and waits for whichever
//! comes first:
//!
//! ```text
//! notifier reply (inline) ─┐
//! respond(id, ..) signal ──┤
//! timeout (≤ max hours) ───┼──▶ store.resolve(..)  (first one wins)
//! shutdown ────────────────┘
//! ```
//!
//! Silence is never approval: timeout and shutdown both resolve the
//! decision as `timeout`, attributed to `"system"`.

use crate::config::MAX_APPROVAL_TIMEOUT_HOURS;
use crate::ports::audit_log::{APPROVAL_REQUESTED, AuditEvent, AuditLog, DECISION_RESOLVED, NoAuditLog};
use crate::ports::decision_store::PendingDecisionStore;
use crate::ports::notification::{Notification, NotificationHub};
use crate::use_cases::wait_registry::WaitRegistry;
use council_domain::decision::approval::{
    APPROVAL_EVENT, SYSTEM_RESPONDER, TIMEOUT_COMMENT,
};
use council_domain::{
    ApprovalOutcome, ApprovalRequest, DecisionStatus, PendingDecision, Priority,
    decision::{is_affirmative_reply, render_approval_message},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Responder recorded for replies returned inline by the notifier.
pub const HUMAN_RESPONDER: &str = "human";

/// Why a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Replied,
    TimedOut,
    Shutdown,
}

impl Wake {
    fn as_str(&self) -> &'static str {
        match self {
            Wake::Replied => "reply",
            Wake::TimedOut => "timeout",
            Wake::Shutdown => "shutdown",
        }
    }
}

pub struct HumanApprovalGate {
    store: Arc<dyn PendingDecisionStore>,
    notifier: Arc<dyn NotificationHub>,
    audit: Arc<dyn AuditLog>,
    registry: WaitRegistry,
    shutdown: CancellationToken,
    max_timeout_hours: u64,
}

impl HumanApprovalGate {
    pub fn new(store: Arc<dyn PendingDecisionStore>, notifier: Arc<dyn NotificationHub>) -> Self {
        Self {
            store,
            notifier,
            audit: Arc::new(NoAuditLog),
            registry: WaitRegistry::new(),
            shutdown: CancellationToken::new(),
            max_timeout_hours: MAX_APPROVAL_TIMEOUT_HOURS,
        }
    }

    pub fn with_audit_log(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_max_timeout_hours(mut self, hours: u64) -> Self {
        self.max_timeout_hours = hours;
        self
    }

    pub fn store(&self) -> &Arc<dyn PendingDecisionStore> {
        &self.store
    }

    /// Number of requests currently waiting for a reply
    pub fn waiting(&self) -> usize {
        self.registry.len()
    }

    /// Resolve every outstanding wait as timed out and refuse new waits
    pub fn shutdown(&self) {
        info!("Approval gate shutting down; {} wait(s) outstanding", self.waiting());
        self.shutdown.cancel();
    }

    /// Ask a human and wait for the answer or the timeout
    pub async fn request_approval(&self, mut request: ApprovalRequest) -> ApprovalOutcome {
        request.timeout_hours = request.timeout_hours.min(self.max_timeout_hours);

        // Register before notifying so an immediate reply cannot be missed.
        let (decision, mut signal) = self.register_decision(&request, new_decision_id).await;
        let id = decision.id.clone();
        let message = render_approval_message(&decision);
        let payload = serde_json::to_value(&decision).unwrap_or_default();

        self.audit
            .record(AuditEvent::new(APPROVAL_REQUESTED, payload.clone()));
        info!(
            "Approval requested: {} ({}, timeout {}h)",
            id, request.action, request.timeout_hours
        );

        if self.shutdown.is_cancelled() {
            return self.finish(&id, Wake::Shutdown).await;
        }

        let priority = if request.is_urgent() {
            Priority::Urgent
        } else {
            Priority::Standard
        };
        let notification = Notification::event(APPROVAL_EVENT, message)
            .with_priority(priority)
            .with_context(payload)
            .requesting_response(request.timeout_hours);

        let mut send = self.notifier.send(notification);
        let deadline = tokio::time::sleep(Duration::from_secs(request.timeout_hours * 3600));
        tokio::pin!(deadline);
        let mut delivered = false;
        let mut listening = true;

        let wake = loop {
            tokio::select! {
                sent = &mut send, if !delivered => {
                    delivered = true;
                    match sent {
                        Ok(Some(reply)) => {
                            self.respond(&id, &reply, HUMAN_RESPONDER).await;
                            break Wake::Replied;
                        }
                        Ok(None) => debug!("Approval request {} delivered; awaiting reply", id),
                        Err(e) => warn!("Approval request {} not delivered: {}", id, e),
                    }
                }
                woken = &mut signal, if listening => match woken {
                    Ok(()) => break Wake::Replied,
                    Err(_) => {
                        debug!("Reply signal for {} dropped; waiting on timeout", id);
                        listening = false;
                    }
                },
                _ = &mut deadline => break Wake::TimedOut,
                _ = self.shutdown.cancelled() => break Wake::Shutdown,
            }
        };

        self.finish(&id, wake).await
    }

    /// Store a fresh pending decision and its wait signal under an unused id
    async fn register_decision(
        &self,
        request: &ApprovalRequest,
        mut next_id: impl FnMut() -> String,
    ) -> (PendingDecision, oneshot::Receiver<()>) {
        loop {
            let id = next_id();
            let Some(signal) = self.registry.register(&id) else {
                debug!("Decision id {} has a waiter; drawing another", id);
                continue;
            };
            let decision = PendingDecision::new(id.clone(), request);
            if self.store.add(decision.clone()).await {
                return (decision, signal);
            }
            self.registry.remove(&id);
            debug!("Decision id {} already stored; drawing another", id);
        }
    }

    /// Apply a human reply to a pending decision.
    ///
    /// Replies in the approval vocabulary approve; anything else rejects.
    /// Returns `None`, after logging, when the decision is unknown or
    /// already resolved.
    pub async fn respond(&self, id: &str, reply: &str, responder: &str) -> Option<PendingDecision> {
        let status = if is_affirmative_reply(reply) {
            DecisionStatus::Approved
        } else {
            DecisionStatus::Rejected
        };

        match self
            .store
            .resolve(id, status, responder, Some(reply.to_string()))
            .await
        {
            Some(decision) => {
                info!("Decision {} {} by {}", id, decision.status, responder);
                self.record_resolution(&decision);
                self.registry.signal(id);
                Some(decision)
            }
            None => {
                warn!(
                    "Reply from {} for decision {} ignored: unknown or already resolved",
                    responder, id
                );
                None
            }
        }
    }

    async fn finish(&self, id: &str, wake: Wake) -> ApprovalOutcome {
        self.registry.remove(id);

        let decision = match self.store.get(id).await {
            Some(d) if d.status.is_terminal() => Some(d),
            _ => self.expire(id, wake).await,
        };

        decision
            .map(|d| ApprovalOutcome::from_decision(&d))
            .unwrap_or_else(|| ApprovalOutcome {
                approved: false,
                comment: TIMEOUT_COMMENT.to_string(),
            })
    }

    /// Fail-closed resolution; a reply that got in first is kept
    async fn expire(&self, id: &str, wake: Wake) -> Option<PendingDecision> {
        match self
            .store
            .resolve(id, DecisionStatus::Timeout, SYSTEM_RESPONDER, None)
            .await
        {
            Some(decision) => {
                warn!("Decision {} auto-rejected ({})", id, wake.as_str());
                self.record_resolution(&decision);
                Some(decision)
            }
            None => {
                info!(
                    "Decision {} already resolved before {}; keeping first resolution",
                    id,
                    wake.as_str()
                );
                self.store.get(id).await
            }
        }
    }

    fn record_resolution(&self, decision: &PendingDecision) {
        self.audit.record(AuditEvent::new(
            DECISION_RESOLVED,
            json!({
                "id": decision.id,
                "status": decision.status,
                "responded_by": decision.responded_by,
                "responded_at": decision.responded_at,
                "response": decision.response,
            }),
        ));
    }
}

/// Short id (8 hex chars) suitable for typing into a reply
fn new_decision_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
