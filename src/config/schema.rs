//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor
//! daemon. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal config is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::monitor::RetryPolicy;

/// Root configuration for the network monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Reachability probe settings.
    pub probe: ProbeConfig,

    /// Recovery backoff settings.
    pub retry: RetryConfig,

    /// Periodic claimed-online audit settings.
    pub audit: AuditConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Reachability probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Endpoint answering a cheap existence check.
    pub url: String,

    /// Hard timeout on a single probe.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080/healthz".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Recovery backoff configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts before recovery gives up.
    pub max_attempts: u32,

    /// Delay before attempt 1, in milliseconds.
    pub base_delay_ms: u64,

    /// Upper bound on the exponential delay, in milliseconds.
    pub max_delay_ms: u64,

    /// Exclusive upper bound of the additive jitter, in milliseconds.
    pub jitter_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay_ms: 2000,
            max_delay_ms: 30_000,
            jitter_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// Convert to the policy consumed by the scheduler.
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            jitter: Duration::from_millis(self.jitter_ms),
        }
    }
}

/// Periodic audit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whether the periodic audit runs at all.
    pub enabled: bool,

    /// Seconds between audits of claimed-online state.
    pub interval_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,

    /// Whether to expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Bind address of the metrics exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "netwatch=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9095".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: MonitorConfig = toml::from_str("").unwrap();
        assert_eq!(config.probe.timeout_secs, 5);
        assert_eq!(config.retry.max_attempts, 10);
        assert_eq!(config.retry.base_delay_ms, 2000);
        assert_eq!(config.retry.max_delay_ms, 30_000);
        assert_eq!(config.audit.interval_secs, 30);
        assert!(config.audit.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [probe]
            url = "http://example.com/ping"

            [retry]
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.probe.url, "http://example.com/ping");
        assert_eq!(config.probe.timeout_secs, 5);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay_ms, 2000);
    }

    #[test]
    fn retry_config_maps_to_policy() {
        let policy = RetryConfig::default().to_policy();
        assert_eq!(policy, RetryPolicy::default());
    }
}
