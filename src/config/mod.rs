//! Client configuration.
//!
//! # Data Flow
//! ```text
//! code (ClientOptions { .. }) or config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientOptions (validated, immutable)
//!     → owned by one ErrorClient
//! ```
//!
//! # Design Decisions
//! - Options are immutable once a client is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Missing credentials fail at construction, never on first report

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_options, ConfigError};
pub use schema::{ClientOptions, TransportKind, TriggerConfig};
pub use validation::{validate_options, ValidationError};
