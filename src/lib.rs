//! Network Resilience Monitor Library
//!
//! Tracks whether this process can actually reach its backend, separating
//! unreliable platform connectivity claims from probe-verified reachability,
//! and drives a bounded, backoff-based recovery loop when the link is lost.
//!
//! # Architecture Overview
//!
//! ```text
//!   Platform signals ──┐                        ┌── Notifier (UI layer)
//!                      ▼                        │
//!              ┌──────────────┐   transitions   │
//!   Audit ────▶│ state machine│─────────────────┘
//!   ticks      │  (monitor)   │
//!              └──────┬───────┘
//!                     │ offline
//!                     ▼
//!              ┌──────────────┐    bounded backoff    ┌─────────┐
//!              │  scheduler   │──────────────────────▶│  probe  │──▶ endpoint
//!              └──────────────┘    probe outcomes     └─────────┘
//! ```
//!
//! Only probes move the machine toward `Online`; raw platform claims merely
//! trigger verification. Health classification is a pure function of the
//! current snapshot.

// Core subsystems
pub mod monitor;
pub mod platform;
pub mod probe;

// Integration surface
pub mod config;
pub mod notify;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use monitor::{
    ConnectionPhase, HealthScore, MonitorError, NetworkMonitor, NetworkState, RetryPolicy,
};
pub use notify::{LogNotifier, NoopNotifier, Notifier};
pub use probe::{HttpProbe, Probe};
