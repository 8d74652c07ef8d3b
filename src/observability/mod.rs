//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Transitions in monitor/machine.rs
//!     → structured tracing events (logging.rs configures the subscriber)
//!     → metric recorders (metrics.rs, exported via Prometheus when enabled)
//! ```
//!
//! # Design Decisions
//! - Logging is always on; metrics exposition is opt-in via config
//! - Recording sites never know whether an exporter is installed

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
