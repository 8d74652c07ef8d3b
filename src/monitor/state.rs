//! Connectivity state machine data.
//!
//! # States
//! - Online: backend reachability verified
//! - Recovering(n): offline, attempt n of the recovery session in flight
//! - Exhausted: recovery gave up after the attempt budget; waits for a
//!   manual retry or a fresh platform "online" claim
//!
//! # State Transitions
//! ```text
//! Online → Recovering(1): raw offline signal, or a failed audit probe
//! Recovering(n) → Recovering(n+1): scheduled probe failed, n < max
//! Recovering(max) → Exhausted: final scheduled probe failed
//! any non-Online → Online: any probe succeeded
//! ```
//!
//! # Design Decisions
//! - Phase is a tagged enum, so "online with a live recovery session" is
//!   unrepresentable
//! - Counters reset on the transition that owns them: `reconnect_attempts`
//!   only on re-entering Online, `outage_count` only by explicit reset
//! - Timestamps are monotonic `Instant`s, never wall-clock

use std::time::Instant;

use crate::platform::LinkMetadata;

/// Connectivity phase of the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// Reachability verified by a probe (or assumed at startup).
    Online,
    /// Recovery session running, carrying the current attempt number.
    Recovering { attempt: u32 },
    /// Recovery attempt budget spent; waiting for manual intervention.
    Exhausted,
}

/// Snapshot of everything the monitor knows about connectivity.
#[derive(Debug, Clone)]
pub struct NetworkState {
    /// Current phase.
    pub phase: ConnectionPhase,
    /// Attempt number of the in-flight recovery session; 0 iff Online.
    pub reconnect_attempts: u32,
    /// Number of Online→Offline transitions observed.
    pub outage_count: u32,
    /// Last metadata reported with a platform "online" claim.
    pub link: LinkMetadata,
    /// When reachability was last verified.
    pub last_online: Option<Instant>,
    /// When the last outage was detected.
    pub last_offline: Option<Instant>,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self {
            phase: ConnectionPhase::Online,
            reconnect_attempts: 0,
            outage_count: 0,
            link: LinkMetadata::default(),
            last_online: None,
            last_offline: None,
        }
    }
}

impl NetworkState {
    /// True when the monitor currently believes the backend is reachable.
    pub fn is_online(&self) -> bool {
        self.phase == ConnectionPhase::Online
    }

    /// Enter recovery from Online: count the outage and start attempt 1.
    pub(crate) fn record_outage(&mut self, now: Instant) {
        debug_assert!(self.is_online());
        self.outage_count += 1;
        self.last_offline = Some(now);
        self.phase = ConnectionPhase::Recovering { attempt: 1 };
        self.reconnect_attempts = 1;
    }

    /// Return to Online after a successful probe.
    pub(crate) fn record_online(&mut self, now: Instant) {
        self.phase = ConnectionPhase::Online;
        self.reconnect_attempts = 0;
        self.last_online = Some(now);
    }

    /// Advance to the given recovery attempt.
    pub(crate) fn record_attempt(&mut self, attempt: u32) {
        self.phase = ConnectionPhase::Recovering { attempt };
        self.reconnect_attempts = attempt;
    }

    /// Give up after the final attempt failed.
    pub(crate) fn record_exhausted(&mut self, max_attempts: u32) {
        self.phase = ConnectionPhase::Exhausted;
        self.reconnect_attempts = max_attempts;
    }

    /// Zero the outage history without touching the phase.
    pub(crate) fn reset_history(&mut self) {
        self.outage_count = 0;
        if self.is_online() {
            self.reconnect_attempts = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outage_counts_once_per_transition() {
        let mut state = NetworkState::default();
        let t0 = Instant::now();
        state.record_outage(t0);
        assert_eq!(state.outage_count, 1);
        assert_eq!(state.phase, ConnectionPhase::Recovering { attempt: 1 });
        assert_eq!(state.last_offline, Some(t0));
    }

    #[test]
    fn attempts_zero_iff_online() {
        let mut state = NetworkState::default();
        assert!(state.is_online());
        assert_eq!(state.reconnect_attempts, 0);

        state.record_outage(Instant::now());
        assert_eq!(state.reconnect_attempts, 1);
        state.record_attempt(4);
        assert_eq!(state.reconnect_attempts, 4);
        state.record_exhausted(10);
        assert!(!state.is_online());
        assert_eq!(state.reconnect_attempts, 10);

        state.record_online(Instant::now());
        assert!(state.is_online());
        assert_eq!(state.reconnect_attempts, 0);
    }

    #[test]
    fn reset_history_keeps_phase() {
        let mut state = NetworkState::default();
        state.record_outage(Instant::now());
        state.record_attempt(3);
        state.reset_history();
        assert_eq!(state.outage_count, 0);
        assert_eq!(state.phase, ConnectionPhase::Recovering { attempt: 3 });
        assert_eq!(state.reconnect_attempts, 3);
    }

    #[test]
    fn timestamps_do_not_regress() {
        let mut state = NetworkState::default();
        let t0 = Instant::now();
        state.record_outage(t0);
        state.record_online(t0 + std::time::Duration::from_secs(5));
        assert!(state.last_online.unwrap() >= state.last_offline.unwrap());
    }
}
