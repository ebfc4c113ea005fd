//! Prometheus export of decision counters.
//!
//! [`PrometheusMetricsSink`] records through the `metrics` facade; the
//! exporter installed by [`start_prometheus_exporter`] serves them over HTTP.

use council_application::ports::metrics::MetricsSink;
use council_domain::DecisionTier;
use metrics::{Unit, counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use tracing::info;

pub const DECISIONS_METRIC: &str = "council_gate_decisions_total";

/// Install the global recorder and start the scrape listener.
///
/// Must run inside a tokio runtime. Call at most once per process.
pub fn start_prometheus_exporter(listen_addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .install()?;

    describe_counter!(
        DECISIONS_METRIC,
        Unit::Count,
        "Decisions handled, labelled by the tier that did the work."
    );

    info!("Prometheus exporter listening on {}", listen_addr);
    Ok(())
}

/// Sink that increments `council_gate_decisions_total{tier=...}`
#[derive(Debug, Default)]
pub struct PrometheusMetricsSink;

impl PrometheusMetricsSink {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSink for PrometheusMetricsSink {
    fn record_decision(&self, tier: DecisionTier) {
        counter!(DECISIONS_METRIC, "tier" => tier.as_str()).increment(1);
    }
}
