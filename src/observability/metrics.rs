//! Metrics collection and exposition.
//!
//! # Metrics
//! - `netwatch_outages_total` (counter): Online→Offline transitions
//! - `netwatch_reconnect_attempts_total` (counter): scheduled recovery attempts
//! - `netwatch_probe_failures_total` (counter): probes that came back false
//! - `netwatch_recovery_exhausted_total` (counter): sessions that gave up
//! - `netwatch_online` (gauge): 1 while Online, 0 otherwise
//!
//! # Design Decisions
//! - The `metrics` facade keeps recording sites free of exporter details
//! - Exposition is optional; recorders are no-ops without an installed
//!   exporter, so the library never pays for unused metrics

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub(crate) fn record_outage() {
    counter!("netwatch_outages_total").increment(1);
}

pub(crate) fn record_attempt() {
    counter!("netwatch_reconnect_attempts_total").increment(1);
}

pub(crate) fn record_probe_failure() {
    counter!("netwatch_probe_failures_total").increment(1);
}

pub(crate) fn record_exhausted() {
    counter!("netwatch_recovery_exhausted_total").increment(1);
}

pub(crate) fn record_online(online: bool) {
    gauge!("netwatch_online").set(if online { 1.0 } else { 0.0 });
}
