//! Error reporting SDK.
//!
//! Reports application errors to a remote ingestion backend over either a
//! task-trigger queue API or a direct HTTP API, retrying transient failures
//! with exponential backoff and normalizing both transports' responses into
//! one [`ReportResult`].
//!
//! ```no_run
//! use error_sdk::{ClientOptions, ErrorClient};
//!
//! # async fn run() -> Result<(), error_sdk::ClientError> {
//! let client = ErrorClient::new(ClientOptions::http("https://example.convex.site", "secret"))?;
//! let result = client
//!     .report_known_error("acme", "E_TIMEOUT", "upstream timed out", None)
//!     .await;
//! if !result.success {
//!     eprintln!("report failed: {:?}", result.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod global;
pub mod observability;
pub mod payload;
pub mod report;
pub mod resilience;
pub mod transport;

pub use client::{create_error_client, create_http_error_client, ClientError, ErrorClient};
pub use config::{ClientOptions, TransportKind};
pub use payload::{Context, Environment, ErrorIdentity, ErrorPayload, FieldPolicy, Severity};
pub use report::{ErrorKind, ReportAction, ReportResult};
pub use transport::{ReportKind, Transport, TransportError};
