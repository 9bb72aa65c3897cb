//! Transports to the ingestion backend.
//!
//! # Data Flow
//! ```text
//! Submission (enriched payload + report kind + submission time)
//!     → trigger.rs: POST <api_url>/api/v1/tasks/<task>/trigger → RunHandle
//!     → http.rs:    POST <convex_url><endpoint>               → HttpReportResponse
//!     → Delivery
//! ```
//!
//! # Design Decisions
//! - One attempt per `deliver` call; retrying belongs to the resilience layer
//! - Any fault (I/O, timeout, non-2xx, undecodable body) is a TransportError
//!   and is treated as retryable
//! - The queue transport never awaits the ingestion job, only the enqueue

pub mod http;
pub mod trigger;

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::payload::{EnrichedPayload, Environment};
use crate::report::ErrorKind;

pub use crate::config::TransportKind;
pub use http::HttpTransport;
pub use trigger::TriggerTransport;

/// Which convenience operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Known,
    Service,
    Full,
}

impl ReportKind {
    /// HTTP endpoint for this kind of report.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Known => "/report-known-error",
            ReportKind::Service => "/report-service-error",
            ReportKind::Full => "/report-error",
        }
    }
}

/// Everything a transport needs to deliver one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: ReportKind,
    pub payload: EnrichedPayload,
    /// Environment the report is filed under, even if not serialized.
    pub environment: Environment,
    /// Fixed once per report so retries share one idempotency key.
    pub submitted_at: SystemTime,
}

impl Submission {
    pub fn new(kind: ReportKind, payload: EnrichedPayload, environment: Environment) -> Self {
        Self {
            kind,
            payload,
            environment,
            submitted_at: SystemTime::now(),
        }
    }

    fn since_epoch(&self) -> Duration {
        self.submitted_at
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }

    pub fn unix_secs(&self) -> u64 {
        self.since_epoch().as_secs()
    }

    pub fn unix_millis(&self) -> u128 {
        self.since_epoch().as_millis()
    }

    pub fn idempotency_key(&self) -> String {
        self.payload.idempotency_key(self.unix_millis())
    }

    pub fn concurrency_key(&self) -> String {
        self.payload.concurrency_key()
    }
}

/// Acknowledgement of an enqueued ingestion job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunHandle {
    pub id: String,
}

/// Body returned by the HTTP ingestion endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpReportResponse {
    pub success: bool,
    #[serde(default)]
    pub trigger_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorKind>,
}

/// Transport-native outcome of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Queued(RunHandle),
    Http(HttpReportResponse),
}

/// A failed delivery attempt. Always retryable.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse JSON response: {0}")]
    Decode(String),

    #[error("Response missing `{0}` field")]
    MissingField(&'static str),

    #[error("{0}")]
    Other(String),
}

/// A way of delivering reports to the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Perform exactly one delivery attempt.
    async fn deliver(&self, submission: &Submission) -> Result<Delivery, TransportError>;
}
