//! Decision Router (tier engine)
//!
//! Routes `(action, amount, context)` by dollar amount:
//!
//! | Amount | Tier | Answer |
//! |--------|------|--------|
//! | `< auto_approve_usd` | Autonomous | approved |
//! | `< human_required_usd` | Council | council verdict, or human on deadlock |
//! | otherwise | Human | human reply, rejected on timeout |
//!
//! Every tier that does work is recorded once in the metrics sink.

use crate::config::DecisionConfig;
use crate::ports::audit_log::{AuditEvent, AuditLog, DECISION_MADE, NoAuditLog};
use crate::ports::council::CouncilPort;
use crate::ports::metrics::{MetricsSink, NoMetrics};
use crate::use_cases::request_approval::HumanApprovalGate;
use council_domain::decision::approval::DEFAULT_HUMAN_REASON;
use council_domain::{
    ApprovalRequest, CouncilPromptTemplate, DecisionOutcome, DecisionTier, DecisionType,
    DeliberationContext, DeliberationResult,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DecisionRouter {
    config: DecisionConfig,
    council: Arc<dyn CouncilPort>,
    gate: Arc<HumanApprovalGate>,
    metrics: Arc<dyn MetricsSink>,
    audit: Arc<dyn AuditLog>,
}

impl DecisionRouter {
    pub fn new(
        config: DecisionConfig,
        council: Arc<dyn CouncilPort>,
        gate: Arc<HumanApprovalGate>,
    ) -> Self {
        Self {
            config,
            council,
            gate,
            metrics: Arc::new(NoMetrics),
            audit: Arc::new(NoAuditLog),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_audit_log(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Decide on an action. Never fails: faults degrade to rejection or
    /// human review.
    pub async fn make_decision(
        &self,
        action: &str,
        amount: f64,
        context: DeliberationContext,
    ) -> DecisionOutcome {
        let tier = self.config.thresholds.route(amount);
        info!("Routing '{}' (${:.2}) to {} tier", action, amount, tier);

        let outcome = match tier {
            DecisionTier::Autonomous => {
                self.metrics.record_decision(DecisionTier::Autonomous);
                info!("Auto-approved: {} (${:.2})", action, amount);
                DecisionOutcome::autonomous()
            }
            DecisionTier::Council => self.council_tier(action, amount, &context).await,
            DecisionTier::Human => self.human_tier(action, amount, &context, None).await,
        };

        self.audit.record(AuditEvent::new(
            DECISION_MADE,
            json!({
                "action": action,
                "amount": amount,
                "approved": outcome.approved,
                "reason": outcome.reason,
                "tier": outcome.tier,
            }),
        ));

        outcome
    }

    async fn council_tier(
        &self,
        action: &str,
        amount: f64,
        context: &DeliberationContext,
    ) -> DecisionOutcome {
        let question = CouncilPromptTemplate::decision_question(action);
        let council_context = context.clone().with("amount", amount);

        let result = self.council.deliberate(&question, &council_context).await;
        self.metrics.record_decision(DecisionTier::Council);

        if result.is_approved() {
            DecisionOutcome::council_approved(result)
        } else if result.is_rejected() {
            DecisionOutcome::council_rejected(result)
        } else {
            warn!(
                "Council deadlocked on '{}' ({:.0}%); escalating to human",
                action,
                result.confidence * 100.0
            );
            self.human_tier(action, amount, context, Some(result)).await
        }
    }

    async fn human_tier(
        &self,
        action: &str,
        amount: f64,
        context: &DeliberationContext,
        advisory: Option<DeliberationResult>,
    ) -> DecisionOutcome {
        let reason = context
            .get_text("reason")
            .unwrap_or_else(|| DEFAULT_HUMAN_REASON.to_string());

        let mut request = ApprovalRequest::new(DecisionType::for_amount(amount), action)
            .with_reason(reason)
            .with_timeout_hours(self.config.approval_timeout_hours);
        if amount > 0.0 {
            request = request.with_amount(amount);
        }
        if let Some(result) = &advisory {
            request = request.with_council_advice(result.vote, result.confidence);
        }

        let approval = self.gate.request_approval(request).await;
        self.metrics.record_decision(DecisionTier::Human);

        DecisionOutcome::human(approval.approved, approval.comment, advisory)
    }
}
