//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! report from the client:
//!     → retries.rs (attempt loop, attempt budget)
//!     → transport call (one per attempt)
//!     → On failure: backoff.rs (exponential delay before next attempt)
//!     → On final failure: NETWORK_ERROR result
//! ```
//!
//! # Design Decisions
//! - No jitter; delays are `base * 2^(attempt-1)`, optionally capped
//! - Timeouts live in the HTTP transport, not here
//! - No shared state between concurrent reports

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{RetryPolicy, EXHAUSTED_MESSAGE};
