//! Network resilience monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! Platform signals (platform):
//!     Raw online/offline claims
//!     → machine.rs verifies with a probe before trusting them
//!
//! Recovery (scheduler.rs):
//!     Offline transition
//!     → bounded exponential backoff, one pending timer
//!     → probe outcome drives the next transition
//!
//! Audit (auditor.rs):
//!     Fixed-interval tick while Online
//!     → probe failure forces the offline transition
//!
//! State machine (machine.rs + state.rs):
//!     Online ←→ Recovering(n) → Exhausted
//!     All mutations serialized on one event loop
//! ```
//!
//! # Design Decisions
//! - Platform signals are claims; only probes change state toward Online
//! - Recovery is bounded: after the attempt budget only a manual retry or a
//!   fresh platform claim can restart it
//! - Health scoring (health.rs) is pure and computed on demand

pub(crate) mod auditor;
pub mod health;
pub mod machine;
pub mod scheduler;
pub mod state;

pub use health::{score, HealthScore};
pub use machine::{MonitorBuilder, MonitorError, NetworkMonitor};
pub use scheduler::RetryPolicy;
pub use state::{ConnectionPhase, NetworkState};
