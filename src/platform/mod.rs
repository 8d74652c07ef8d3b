//! Platform connectivity signal source.
//!
//! # Responsibilities
//! - Define the raw online/offline events the platform can emit
//! - Carry optional connection-quality metadata alongside "online" events
//! - Degrade to defaults when the platform exposes no quality data
//!
//! # Design Decisions
//! - Signals are *claims*, not facts: the monitor always verifies them with
//!   a probe before trusting them
//! - Events arrive over an injected tokio mpsc channel, so tests can drive
//!   the monitor with simulated signals and no real platform dependency
//! - A missing quality capability is never an error; all fields default

use tokio::sync::mpsc;

/// A raw connectivity event reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    /// Platform claims the link is up, with whatever metadata it has.
    Online(LinkMetadata),
    /// Platform claims the link is down.
    Offline,
}

/// Connection-quality metadata attached to an "online" claim.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkMetadata {
    /// Physical connection type ("wifi", "cellular", ...).
    pub connection_type: String,
    /// Effective throughput class ("4g", "3g", "2g", "slow-2g", ...).
    pub effective_type: String,
    /// Estimated downlink bandwidth in Mbps.
    pub downlink: f64,
    /// Estimated round-trip time in milliseconds.
    pub rtt: f64,
    /// Whether the user has requested reduced data usage.
    pub save_data: bool,
}

impl Default for LinkMetadata {
    fn default() -> Self {
        Self {
            connection_type: "unknown".to_string(),
            effective_type: "unknown".to_string(),
            downlink: 0.0,
            rtt: 0.0,
            save_data: false,
        }
    }
}

impl LinkMetadata {
    /// True when the effective throughput class marks the link as slow.
    pub fn is_slow(&self) -> bool {
        matches!(self.effective_type.as_str(), "slow-2g" | "2g")
    }
}

/// Sender half handed to the platform integration.
pub type SignalSender = mpsc::UnboundedSender<LinkEvent>;

/// Receiver half consumed by the monitor.
pub type SignalReceiver = mpsc::UnboundedReceiver<LinkEvent>;

/// Create a signal channel pair.
pub fn signal_channel() -> (SignalSender, SignalReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults_when_capability_missing() {
        let meta = LinkMetadata::default();
        assert_eq!(meta.connection_type, "unknown");
        assert_eq!(meta.effective_type, "unknown");
        assert_eq!(meta.downlink, 0.0);
        assert_eq!(meta.rtt, 0.0);
        assert!(!meta.save_data);
    }

    #[test]
    fn slow_classes_are_flagged() {
        let mut meta = LinkMetadata::default();
        assert!(!meta.is_slow());
        meta.effective_type = "2g".into();
        assert!(meta.is_slow());
        meta.effective_type = "slow-2g".into();
        assert!(meta.is_slow());
        meta.effective_type = "4g".into();
        assert!(!meta.is_slow());
    }
}
