//! Decision metrics port
//!
//! The router calls [`MetricsSink::record_decision`] once for every tier
//! that actually did work. A council deadlock that escalates to a human
//! therefore records both `council` and `human`.

use council_domain::DecisionTier;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait MetricsSink: Send + Sync {
    fn record_decision(&self, tier: DecisionTier);
}

/// No-op sink for tests and when metrics are disabled
pub struct NoMetrics;

impl MetricsSink for NoMetrics {
    fn record_decision(&self, _tier: DecisionTier) {}
}

/// Point-in-time counter values for dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DecisionMetrics {
    pub total: u64,
    pub autonomous: u64,
    pub council: u64,
    pub human: u64,
}

/// Lock-free in-process counters
#[derive(Debug, Default)]
pub struct DecisionCounters {
    total: AtomicU64,
    autonomous: AtomicU64,
    council: AtomicU64,
    human: AtomicU64,
}

impl DecisionCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DecisionMetrics {
        DecisionMetrics {
            total: self.total.load(Ordering::Relaxed),
            autonomous: self.autonomous.load(Ordering::Relaxed),
            council: self.council.load(Ordering::Relaxed),
            human: self.human.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSink for DecisionCounters {
    fn record_decision(&self, tier: DecisionTier) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let counter = match tier {
            DecisionTier::Autonomous => &self.autonomous,
            DecisionTier::Council => &self.council,
            DecisionTier::Human => &self.human,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Forwards every record to each inner sink
pub struct CompositeMetrics {
    sinks: Vec<Arc<dyn MetricsSink>>,
}

impl CompositeMetrics {
    pub fn new(sinks: Vec<Arc<dyn MetricsSink>>) -> Self {
        Self { sinks }
    }
}

impl MetricsSink for CompositeMetrics {
    fn record_decision(&self, tier: DecisionTier) {
        for sink in &self.sinks {
            sink.record_decision(tier);
        }
    }
}
