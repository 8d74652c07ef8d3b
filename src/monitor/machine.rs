//! Connectivity state machine and its public handle.
//!
//! # Responsibilities
//! - Own `NetworkState`; apply every transition in one place
//! - Verify platform claims with probes before trusting them
//! - Drive the recovery session on loss of reachability
//!
//! # Design Decisions
//! - One event-loop task serializes all transitions; the handle is a cheap
//!   clone around the event channel sender
//! - Probes run in spawned tasks tagged with a generation; bumping the
//!   generation on a transition invalidates every superseded probe
//! - A manual retry resolves its caller with the outcome of the probe that
//!   call triggered, never a stale one

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::lifecycle::Shutdown;
use crate::monitor::auditor::HealthAuditor;
use crate::monitor::health::{self, HealthScore};
use crate::monitor::scheduler::{RecoverySession, RetryPolicy};
use crate::monitor::state::NetworkState;
use crate::notify::{NoopNotifier, Notifier};
use crate::observability::metrics;
use crate::platform::{LinkEvent, SignalReceiver};
use crate::probe::Probe;

/// Where a probe outcome originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeOrigin {
    /// Timer of recovery attempt `attempt` fired.
    Scheduled { attempt: u32 },
    /// A caller invoked `retry_now`.
    Manual,
    /// Confirmation of a raw platform "online" claim.
    Confirm,
    /// Periodic audit of claimed-online state (also the startup check).
    Audit,
}

/// Events consumed by the state machine's event loop.
pub(crate) enum Event {
    Link(LinkEvent),
    ProbeOutcome {
        generation: u64,
        origin: ProbeOrigin,
        online: bool,
    },
    AuditTick,
    RetryNow {
        reply: oneshot::Sender<bool>,
    },
    GetState {
        reply: oneshot::Sender<NetworkState>,
    },
    ResetHistory,
    Dispose,
}

/// Errors returned by the monitor handle.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The monitor has been disposed; its event loop is gone.
    #[error("network monitor has been disposed")]
    Disposed,
}

/// Handle to a running network monitor.
#[derive(Clone)]
pub struct NetworkMonitor {
    events: mpsc::UnboundedSender<Event>,
}

impl NetworkMonitor {
    /// Start building a monitor around the given probe.
    pub fn builder(probe: Arc<dyn Probe>) -> MonitorBuilder {
        MonitorBuilder {
            probe,
            notifier: Arc::new(NoopNotifier),
            policy: RetryPolicy::default(),
            audit_interval: Duration::from_secs(30),
            audit_enabled: true,
            assume_online: true,
            signals: None,
        }
    }

    /// Snapshot of the current connectivity state.
    pub async fn state(&self) -> Result<NetworkState, MonitorError> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Event::GetState { reply })
            .map_err(|_| MonitorError::Disposed)?;
        rx.await.map_err(|_| MonitorError::Disposed)
    }

    /// Coarse health classification of the current state.
    pub async fn health(&self) -> Result<HealthScore, MonitorError> {
        Ok(health::score(&self.state().await?))
    }

    /// Cancel any pending scheduled attempt and probe immediately.
    ///
    /// Resolves with the outcome of the probe this call triggered. On
    /// failure the machine re-enters recovery at attempt 1.
    pub async fn retry_now(&self) -> Result<bool, MonitorError> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Event::RetryNow { reply })
            .map_err(|_| MonitorError::Disposed)?;
        rx.await.map_err(|_| MonitorError::Disposed)
    }

    /// Zero the outage history without changing the current phase.
    pub fn reset_outage_history(&self) -> Result<(), MonitorError> {
        self.events
            .send(Event::ResetHistory)
            .map_err(|_| MonitorError::Disposed)
    }

    /// Tear the monitor down; cancels all timers. Idempotent.
    pub fn dispose(&self) {
        let _ = self.events.send(Event::Dispose);
    }
}

/// Configures and spawns a [`NetworkMonitor`].
pub struct MonitorBuilder {
    probe: Arc<dyn Probe>,
    notifier: Arc<dyn Notifier>,
    policy: RetryPolicy,
    audit_interval: Duration,
    audit_enabled: bool,
    assume_online: bool,
    signals: Option<SignalReceiver>,
}

impl MonitorBuilder {
    /// Consumer of transition events. Defaults to a no-op.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Recovery loop bounds.
    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Interval of the periodic claimed-online audit.
    pub fn audit_interval(mut self, interval: Duration) -> Self {
        self.audit_interval = interval;
        self
    }

    /// Disable the periodic audit (tests mostly).
    pub fn audit_enabled(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// The platform's raw connectivity claim at startup.
    pub fn assume_online(mut self, online: bool) -> Self {
        self.assume_online = online;
        self
    }

    /// Platform signal stream to consume.
    pub fn signals(mut self, signals: SignalReceiver) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Spawn the monitor's tasks and return its handle.
    pub fn spawn(self) -> NetworkMonitor {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        if self.audit_enabled {
            let auditor = HealthAuditor::new(self.audit_interval, events_tx.clone());
            tokio::spawn(auditor.run(shutdown.subscribe()));
        }

        if let Some(mut signals) = self.signals {
            let tx = events_tx.clone();
            tokio::spawn(async move {
                while let Some(event) = signals.recv().await {
                    if tx.send(Event::Link(event)).is_err() {
                        break;
                    }
                }
            });
        }

        let state = NetworkState::default();
        let last_health = health::score(&state);
        let mut machine = Machine {
            state,
            policy: self.policy,
            probe: self.probe,
            notifier: self.notifier,
            events_tx: events_tx.clone(),
            generation: 0,
            session: None,
            last_health,
        };

        // Derive the initial phase from the raw platform claim, then verify
        // it: a claimed-online start gets one immediate audit probe, a
        // claimed-offline start takes the ordinary offline transition.
        if self.assume_online {
            machine.spawn_probe(ProbeOrigin::Audit);
        } else {
            machine.go_offline("platform offline at startup");
        }

        tokio::spawn(machine.run(events_rx, shutdown));

        NetworkMonitor { events: events_tx }
    }
}

/// The state machine proper. Lives inside the event-loop task.
struct Machine {
    state: NetworkState,
    policy: RetryPolicy,
    probe: Arc<dyn Probe>,
    notifier: Arc<dyn Notifier>,
    events_tx: mpsc::UnboundedSender<Event>,
    /// Bumped on every transition that supersedes in-flight probes.
    generation: u64,
    /// Present iff a recovery attempt is scheduled. Dropping aborts its timer.
    session: Option<RecoverySession>,
    last_health: HealthScore,
}

impl Machine {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>, shutdown: Shutdown) {
        while let Some(event) = events.recv().await {
            match event {
                Event::Dispose => break,
                other => self.handle(other),
            }
        }

        // Teardown: no timer may fire past this point.
        self.session = None;
        self.generation += 1;
        shutdown.trigger();
        tracing::debug!("Network monitor event loop stopped");
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Link(LinkEvent::Offline) => {
                if self.state.is_online() {
                    self.go_offline("platform offline signal");
                } else {
                    tracing::debug!("Redundant offline signal ignored");
                }
            }
            Event::Link(LinkEvent::Online(meta)) => {
                // A raw "online" claim is unreliable; verify before trusting.
                self.state.link = meta;
                tracing::debug!("Platform reported online, confirming with probe");
                self.spawn_probe(ProbeOrigin::Confirm);
            }
            Event::AuditTick => {
                if self.state.is_online() {
                    self.spawn_probe(ProbeOrigin::Audit);
                }
            }
            Event::RetryNow { reply } => self.handle_retry_now(reply),
            Event::GetState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Event::ResetHistory => {
                self.state.reset_history();
                tracing::info!("Outage history reset");
                self.emit_health_change();
            }
            Event::ProbeOutcome {
                generation,
                origin,
                online,
            } => self.handle_probe_outcome(generation, origin, online),
            Event::Dispose => unreachable!("handled by the event loop"),
        }
    }

    fn handle_retry_now(&mut self, reply: oneshot::Sender<bool>) {
        // Supersede whatever is pending; the caller gets its own probe.
        self.generation += 1;
        self.session = None;

        let generation = self.generation;
        let probe = self.probe.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let online = probe.check().await;
            let _ = events.send(Event::ProbeOutcome {
                generation,
                origin: ProbeOrigin::Manual,
                online,
            });
            let _ = reply.send(online);
        });
    }

    fn handle_probe_outcome(&mut self, generation: u64, origin: ProbeOrigin, online: bool) {
        if generation != self.generation {
            tracing::debug!(?origin, "Stale probe outcome ignored");
            return;
        }

        if online {
            self.go_online();
            return;
        }

        metrics::record_probe_failure();
        match origin {
            ProbeOrigin::Scheduled { attempt } => self.handle_attempt_failed(attempt),
            ProbeOrigin::Manual => {
                if self.state.is_online() {
                    tracing::warn!("Manual retry probe failed while online; deferring to audit");
                } else {
                    // Manual retry restarts the recovery session from scratch.
                    self.state.record_attempt(1);
                    self.start_session(Uuid::new_v4(), 1);
                }
            }
            ProbeOrigin::Confirm => {
                tracing::warn!("Platform reported online but probe failed; awaiting periodic audit");
            }
            ProbeOrigin::Audit => {
                if self.state.is_online() {
                    self.go_offline("audit probe failed");
                }
            }
        }
    }

    fn handle_attempt_failed(&mut self, attempt: u32) {
        if attempt >= self.policy.max_attempts {
            self.generation += 1;
            self.session = None;
            self.state.record_exhausted(self.policy.max_attempts);
            metrics::record_exhausted();
            tracing::error!(
                attempts = self.policy.max_attempts,
                "Recovery exhausted; waiting for manual retry or platform signal"
            );
            self.notifier.on_recovery_exhausted();
            self.emit_health_change();
            return;
        }

        let next = attempt + 1;
        let id = self
            .session
            .as_ref()
            .map(RecoverySession::id)
            .unwrap_or_else(Uuid::new_v4);
        self.state.record_attempt(next);
        self.start_session(id, next);
    }

    fn go_offline(&mut self, reason: &str) {
        self.generation += 1;
        self.session = None;
        self.state.record_outage(Instant::now());
        metrics::record_outage();
        metrics::record_online(false);
        tracing::warn!(
            reason,
            outages = self.state.outage_count,
            "Connectivity lost, starting recovery"
        );
        self.notifier.on_offline_detected();
        self.start_session(Uuid::new_v4(), 1);
        self.emit_health_change();
    }

    fn go_online(&mut self) {
        let was_online = self.state.is_online();
        self.generation += 1;
        self.session = None;
        self.state.record_online(Instant::now());
        if !was_online {
            metrics::record_online(true);
            tracing::info!(
                outages = self.state.outage_count,
                "Reachability verified, back online"
            );
            self.notifier.on_reconnected();
        }
        self.emit_health_change();
    }

    fn start_session(&mut self, id: Uuid, attempt: u32) {
        metrics::record_attempt();
        self.session = Some(RecoverySession::schedule(
            id,
            attempt,
            &self.policy,
            self.probe.clone(),
            self.events_tx.clone(),
            self.generation,
        ));
    }

    fn spawn_probe(&self, origin: ProbeOrigin) {
        let generation = self.generation;
        let probe = self.probe.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let online = probe.check().await;
            let _ = events.send(Event::ProbeOutcome {
                generation,
                origin,
                online,
            });
        });
    }

    fn emit_health_change(&mut self) {
        let current = health::score(&self.state);
        if current != self.last_health {
            self.last_health = current;
            self.notifier.on_health_changed(current);
        }
    }
}
