//! Reachability probing.
//!
//! # Responsibilities
//! - Define the probe capability the monitor depends on
//! - Provide the HTTP implementation used in production
//!
//! # Design Decisions
//! - A probe answers success/failure only; it never errors and never
//!   returns payload data
//! - The trait is the test seam: scenario tests inject scripted probes
//! - Probing is the only I/O this subsystem performs

use async_trait::async_trait;

pub mod http;

pub use http::HttpProbe;

/// A single, time-bounded reachability check.
///
/// Implementations must resolve within their configured timeout and must
/// map every transport error, timeout, or non-success response to `false`.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Check whether the target is reachable right now.
    async fn check(&self) -> bool;
}
