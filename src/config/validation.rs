//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sane backoff bounds)
//! - Check the probe URL actually parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: MonitorConfig → Result<(), Vec<...>>
//! - Runs before the config is accepted into the system

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("probe.url is not a valid URI: {0}")]
    InvalidProbeUrl(String),

    #[error("probe.timeout_secs must be greater than zero")]
    ZeroProbeTimeout,

    #[error("retry.max_attempts must be at least 1")]
    ZeroMaxAttempts,

    #[error("retry.base_delay_ms must be greater than zero")]
    ZeroBaseDelay,

    #[error("retry.max_delay_ms ({max}) must not be below retry.base_delay_ms ({base})")]
    DelayCapBelowBase { base: u64, max: u64 },

    #[error("audit.interval_secs must be greater than zero")]
    ZeroAuditInterval,

    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.url.parse::<Uri>().is_err() {
        errors.push(ValidationError::InvalidProbeUrl(config.probe.url.clone()));
    }
    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::ZeroMaxAttempts);
    }
    if config.retry.base_delay_ms == 0 {
        errors.push(ValidationError::ZeroBaseDelay);
    }
    if config.retry.max_delay_ms < config.retry.base_delay_ms {
        errors.push(ValidationError::DelayCapBelowBase {
            base: config.retry.base_delay_ms,
            max: config.retry.max_delay_ms,
        });
    }

    if config.audit.enabled && config.audit.interval_secs == 0 {
        errors.push(ValidationError::ZeroAuditInterval);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
