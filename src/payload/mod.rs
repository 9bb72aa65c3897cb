//! Error payloads and enrichment.
//!
//! # Data Flow
//! ```text
//! caller arguments / ErrorPayload
//!     → enrich.rs (merge default context, default environment, field policy)
//!     → EnrichedPayload (wire shape, camelCase)
//!     → transport
//! ```
//!
//! # Design Decisions
//! - Identity is an enum, so a payload never carries both a code and a service
//! - Context merge is an explicit ordered merge; report keys override defaults
//! - Presence of `context`/`environment` on the wire is a configured policy

pub mod enrich;
pub mod types;

pub use enrich::{merge_context, EnrichedPayload, Enricher, FieldPolicy};
pub use types::{Context, Environment, ErrorIdentity, ErrorPayload, Severity};
