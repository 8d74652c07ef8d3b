//! Periodic audit of claimed-online state.
//!
//! # Responsibilities
//! - Tick on a fixed interval, independent of recovery scheduling
//! - Ask the state machine to re-verify reachability while it claims Online
//!
//! # Design Decisions
//! - The auditor only emits ticks; the machine decides whether to probe, so
//!   the no-op-while-offline rule lives next to the other transition rules
//! - Compensates for missed or wrong platform signals; this is the only
//!   path that catches a silently dead link while the state says Online

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};

use crate::monitor::machine::Event;

pub(crate) struct HealthAuditor {
    interval: Duration,
    events: mpsc::UnboundedSender<Event>,
}

impl HealthAuditor {
    pub(crate) fn new(interval: Duration, events: mpsc::UnboundedSender<Event>) -> Self {
        Self { interval, events }
    }

    pub(crate) async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::debug!(interval_secs = self.interval.as_secs(), "Health auditor starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; audits start one interval in.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.events.send(Event::AuditTick).is_err() {
                        break;
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Health auditor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
