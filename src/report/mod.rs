//! Report results.
//!
//! # Data Flow
//! ```text
//! transport Delivery (queue handle | HTTP body)
//!     → normalize.rs
//!     → ReportResult
//!
//! exhausted retries / uninitialized global client
//!     → ReportResult::failure(NETWORK_ERROR, ..)
//! ```
//!
//! # Design Decisions
//! - Every reporting call resolves to a ReportResult; callers check `success`
//! - Failure shape is transport-agnostic

pub mod normalize;
pub mod types;

pub use normalize::normalize;
pub use types::{ErrorKind, ReportAction, ReportResult, UNINITIALIZED_MESSAGE};
