//! Pending-decision store port
//!
//! The store is the single arbiter of a decision's lifecycle: `resolve`
//! only succeeds from `Pending`, so when a human reply and a timeout race
//! for the same id, exactly one of them wins.
//!
//! # Built-in Implementations
//!
//! - [`InMemoryDecisionStore`] - `DashMap`-backed; records are never deleted

use async_trait::async_trait;
use council_domain::{DecisionStatus, PendingDecision};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

#[async_trait]
pub trait PendingDecisionStore: Send + Sync {
    /// Register a new decision.
    ///
    /// Returns false, leaving the stored record untouched, when the id is
    /// already taken.
    async fn add(&self, decision: PendingDecision) -> bool;

    /// Move a pending decision to a terminal status.
    ///
    /// Returns the updated record, or `None` when the id is unknown or the
    /// decision was already resolved. A `None` is a no-op, never an error.
    async fn resolve(
        &self,
        id: &str,
        status: DecisionStatus,
        responder: &str,
        response: Option<String>,
    ) -> Option<PendingDecision>;

    async fn get(&self, id: &str) -> Option<PendingDecision>;

    /// Decisions with the given status, oldest first
    async fn list(&self, status: DecisionStatus) -> Vec<PendingDecision>;
}

/// In-process store; operations on different ids never block each other.
#[derive(Debug, Default)]
pub struct InMemoryDecisionStore {
    decisions: DashMap<String, PendingDecision>,
}

impl InMemoryDecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[async_trait]
impl PendingDecisionStore for InMemoryDecisionStore {
    async fn add(&self, decision: PendingDecision) -> bool {
        match self.decisions.entry(decision.id.clone()) {
            Entry::Occupied(_) => {
                debug!("Decision id {} already in use", decision.id);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(decision);
                true
            }
        }
    }

    async fn resolve(
        &self,
        id: &str,
        status: DecisionStatus,
        responder: &str,
        response: Option<String>,
    ) -> Option<PendingDecision> {
        // The entry guard holds the shard lock for the whole transition.
        let mut entry = self.decisions.get_mut(id)?;
        match entry.resolve(status, responder, response) {
            Ok(()) => Some(entry.clone()),
            Err(e) => {
                debug!("Resolution of {} ignored: {}", id, e);
                None
            }
        }
    }

    async fn get(&self, id: &str) -> Option<PendingDecision> {
        self.decisions.get(id).map(|d| d.clone())
    }

    async fn list(&self, status: DecisionStatus) -> Vec<PendingDecision> {
        let mut matching: Vec<PendingDecision> = self
            .decisions
            .iter()
            .filter(|d| d.status == status)
            .map(|d| d.clone())
            .collect();
        matching.sort_by_key(|d| d.created_at);
        matching
    }
}
