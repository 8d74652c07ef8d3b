//! Transition notifications.
//!
//! # Responsibilities
//! - Define the callback surface the UI layer consumes
//! - Provide a no-op default and a tracing-backed implementation
//!
//! # Design Decisions
//! - Fire-and-forget: the monitor never waits for acknowledgement
//! - Callbacks run on the monitor's event loop, so they must be cheap;
//!   anything slow belongs behind a channel on the consumer's side

use crate::monitor::health::HealthScore;

/// Consumer of connectivity transition events.
#[allow(unused_variables)]
pub trait Notifier: Send + Sync {
    /// The monitor verified a loss of reachability and began recovery.
    fn on_offline_detected(&self) {}

    /// A probe succeeded and the monitor is back Online.
    fn on_reconnected(&self) {}

    /// The recovery attempt budget is spent; manual intervention needed.
    fn on_recovery_exhausted(&self) {}

    /// The coarse health classification changed.
    fn on_health_changed(&self, score: HealthScore) {}
}

/// Notifier that ignores every event.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {}

/// Notifier that logs every event through tracing.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn on_offline_detected(&self) {
        tracing::warn!("Connectivity lost, recovery started");
    }

    fn on_reconnected(&self) {
        tracing::info!("Connectivity restored");
    }

    fn on_recovery_exhausted(&self) {
        tracing::error!("Recovery attempts exhausted; waiting for manual retry");
    }

    fn on_health_changed(&self, score: HealthScore) {
        tracing::info!(health = %score, "Connection health changed");
    }
}
