//! Metrics adapters

mod prometheus;

pub use prometheus::{DECISIONS_METRIC, PrometheusMetricsSink, start_prometheus_exporter};
