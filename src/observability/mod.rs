//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client / retries / transports produce:
//!     → tracing events (report_id span, attempt, delay, transport)
//!     → metrics.rs (attempt and report counters, report latency)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host application installs
//!     → logging.rs for the bundled CLI
//! ```

pub mod logging;
pub mod metrics;
