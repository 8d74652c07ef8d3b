//! Coarse connection health classification.
//!
//! # Design Decisions
//! - Pure function of a state snapshot; no clocks, no I/O
//! - Rules are ordered; the first match wins
//! - Outage history dominates instantaneous link quality

use serde::Serialize;
use std::fmt;

use crate::monitor::state::NetworkState;

/// Health classification derived from connectivity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthScore {
    Excellent,
    Good,
    Poor,
    Critical,
}

impl fmt::Display for HealthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthScore::Excellent => "excellent",
            HealthScore::Good => "good",
            HealthScore::Poor => "poor",
            HealthScore::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Classify the current connectivity state. First matching rule wins.
pub fn score(state: &NetworkState) -> HealthScore {
    if !state.is_online() {
        return HealthScore::Critical;
    }
    if state.outage_count > 5 {
        return HealthScore::Poor;
    }
    if state.link.is_slow() {
        return HealthScore::Poor;
    }
    if state.link.rtt > 1000.0 {
        return HealthScore::Poor;
    }
    if state.outage_count > 2 {
        return HealthScore::Good;
    }
    HealthScore::Excellent
}
