//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger shutdown broadcast
//!
//! Shutdown (shutdown.rs):
//!     Broadcast → auditor exits → monitor disposed → daemon exits
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the signal out to every background task
//! - Dispose is deterministic: no timer fires after teardown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
