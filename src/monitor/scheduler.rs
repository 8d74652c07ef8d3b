//! Recovery scheduling: bounded exponential backoff with jitter.
//!
//! # Responsibilities
//! - Compute the delay for each recovery attempt
//! - Own the single pending timer of the active recovery session
//! - Run the probe when the timer fires and report the outcome
//!
//! # Design Decisions
//! - Jitter is a uniform additive term, so retry storms cannot synchronize
//! - At most one timer per session; replacing a session aborts the old timer
//! - Outcomes carry the machine's generation, so a superseded timer that
//!   races its own abort still cannot apply

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use uuid::Uuid;

use crate::monitor::machine::{Event, ProbeOrigin};
use crate::probe::Probe;

/// Bounds of the recovery loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts before giving up.
    pub max_attempts: u32,
    /// Delay before attempt 1.
    pub base_delay: Duration,
    /// Upper bound on the exponential delay, before jitter.
    pub max_delay: Duration,
    /// Exclusive upper bound of the additive jitter.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(2000),
            max_delay: Duration::from_millis(30_000),
            jitter: Duration::from_millis(1000),
        }
    }
}

/// Calculate the jittered backoff delay for attempt `n` (n >= 1).
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    debug_assert!(attempt >= 1);

    let exponential_base = 2u64.saturating_pow(attempt.saturating_sub(1));
    let delay_ms = (policy.base_delay.as_millis() as u64).saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(policy.max_delay.as_millis() as u64);

    let jitter_range = policy.jitter.as_millis() as u64;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

/// The active recovery session: one attempt number, one pending timer.
pub(crate) struct RecoverySession {
    id: Uuid,
    attempt: u32,
    timer: JoinHandle<()>,
}

impl RecoverySession {
    /// Schedule the probe for `attempt` after its backoff delay.
    pub(crate) fn schedule(
        id: Uuid,
        attempt: u32,
        policy: &RetryPolicy,
        probe: Arc<dyn Probe>,
        events: mpsc::UnboundedSender<Event>,
        generation: u64,
    ) -> Self {
        let delay = backoff_delay(policy, attempt);
        tracing::info!(
            session = %id,
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Scheduled reconnect attempt"
        );

        let timer = tokio::spawn(async move {
            time::sleep(delay).await;
            let online = probe.check().await;
            let _ = events.send(Event::ProbeOutcome {
                generation,
                origin: ProbeOrigin::Scheduled { attempt },
                online,
            });
        });

        Self { id, attempt, timer }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    #[allow(dead_code)]
    pub(crate) fn attempt(&self) -> u32 {
        self.attempt
    }
}

impl Drop for RecoverySession {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter_policy() -> RetryPolicy {
        RetryPolicy {
            jitter: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    #[test]
    fn delay_doubles_until_the_cap() {
        let policy = no_jitter_policy();
        assert_eq!(backoff_delay(&policy, 1), Duration::from_millis(2000));
        assert_eq!(backoff_delay(&policy, 2), Duration::from_millis(4000));
        assert_eq!(backoff_delay(&policy, 3), Duration::from_millis(8000));
        assert_eq!(backoff_delay(&policy, 4), Duration::from_millis(16_000));
        assert_eq!(backoff_delay(&policy, 5), Duration::from_millis(30_000));
        assert_eq!(backoff_delay(&policy, 10), Duration::from_millis(30_000));
    }

    #[test]
    fn jitter_stays_within_its_bound() {
        let policy = RetryPolicy::default();
        for attempt in 1..=10 {
            let base = backoff_delay(&no_jitter_policy(), attempt);
            for _ in 0..50 {
                let jittered = backoff_delay(&policy, attempt);
                assert!(jittered >= base);
                assert!(jittered < base + Duration::from_millis(1000));
            }
        }
    }

    #[test]
    fn huge_attempt_numbers_do_not_overflow() {
        let policy = no_jitter_policy();
        assert_eq!(backoff_delay(&policy, 64), Duration::from_millis(30_000));
        assert_eq!(backoff_delay(&policy, u32::MAX), Duration::from_millis(30_000));
    }
}
