//! Error reporting client.
//!
//! # Data Flow
//! ```text
//! report_known_error / report_service_error / report_error
//!     → payload::Enricher (default context, environment, field policy)
//!     → Submission (report kind, submission time)
//!     → resilience::RetryPolicy (attempt loop)
//!         → Transport::deliver (one call per attempt)
//!         → report::normalize
//!     → ReportResult
//! ```
//!
//! # Design Decisions
//! - Transport is chosen once, at construction, from `options.transport`
//! - Invalid options fail construction; reports never return `Err`
//! - The client is cheap to clone and holds no mutable state

mod error;

pub use error::ClientError;

use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{validate_options, ClientOptions, TransportKind, ValidationError};
use crate::observability::metrics;
use crate::payload::{Context, Enricher, ErrorPayload};
use crate::report::{normalize, ReportResult};
use crate::resilience::RetryPolicy;
use crate::transport::{HttpTransport, ReportKind, Submission, Transport, TriggerTransport};

/// Reports errors to the ingestion backend over one transport.
#[derive(Clone)]
pub struct ErrorClient {
    options: Arc<ClientOptions>,
    enricher: Enricher,
    retry: RetryPolicy,
    transport: Arc<dyn Transport>,
}

impl ErrorClient {
    /// Validate `options` and build the transport they select.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        validate_options(&options)?;

        let transport: Arc<dyn Transport> = match options.transport {
            TransportKind::Trigger => Arc::new(TriggerTransport::from_config(&options.trigger)?),
            TransportKind::Http => {
                let url = options
                    .convex_url
                    .as_deref()
                    .ok_or_else(|| ClientError::from(vec![ValidationError::MissingConvexUrl]))?;
                let secret = options
                    .convex_secret
                    .clone()
                    .ok_or_else(|| ClientError::from(vec![ValidationError::MissingConvexSecret]))?;
                Arc::new(HttpTransport::new(url, secret, options.timeout())?)
            }
        };

        tracing::debug!(transport = %options.transport, max_retries = options.max_retries, "Error client created");
        Ok(Self::with_transport(options, transport))
    }

    /// Build a client around an existing transport, skipping credential checks.
    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            enricher: Enricher::from_options(&options),
            retry: RetryPolicy::from_options(&options),
            options: Arc::new(options),
            transport,
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Report an error with a known error code.
    pub async fn report_known_error(
        &self,
        company_code: impl Into<String>,
        error_code: impl Into<String>,
        message: impl Into<String>,
        context: Option<Context>,
    ) -> ReportResult {
        let mut payload = ErrorPayload::known(company_code, error_code, message);
        payload.context = context;
        self.report(ReportKind::Known, payload).await
    }

    /// Report a service error for server-side classification.
    pub async fn report_service_error(
        &self,
        company_code: impl Into<String>,
        service: impl Into<String>,
        message: impl Into<String>,
        context: Option<Context>,
    ) -> ReportResult {
        let mut payload = ErrorPayload::service(company_code, service, message);
        payload.context = context;
        self.report(ReportKind::Service, payload).await
    }

    /// Report an error with full control over the payload.
    pub async fn report_error(&self, payload: ErrorPayload) -> ReportResult {
        self.report(ReportKind::Full, payload).await
    }

    /// Report a prepared payload through the operation named by `kind`.
    ///
    /// Over HTTP, `kind` selects the endpoint; the queue transport ignores it.
    pub async fn report(&self, kind: ReportKind, payload: ErrorPayload) -> ReportResult {
        let report_id = Uuid::new_v4();
        let transport_label = self.transport.kind().as_str();
        let span = tracing::info_span!(
            "report",
            %report_id,
            transport = transport_label,
            company_code = %payload.company_code
        );

        async move {
            let started = Instant::now();
            let environment = self.enricher.effective_environment(&payload);
            let submission = Submission::new(kind, self.enricher.enrich(payload), environment);

            let transport = self.transport.as_ref();
            let submission = &submission;
            let result = self
                .retry
                .run(transport_label, |_attempt| async move {
                    transport.deliver(submission).await.map(normalize)
                })
                .await;

            metrics::record_report(transport_label, result.success, started);
            if result.success {
                tracing::debug!(group_id = ?result.group_id, "Report accepted");
            } else {
                tracing::warn!(error = ?result.error, reason = ?result.message, "Report failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for ErrorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorClient")
            .field("transport", &self.transport.kind())
            .field("options", &self.options)
            .finish()
    }
}

/// Create a client from options.
pub fn create_error_client(options: ClientOptions) -> Result<ErrorClient, ClientError> {
    ErrorClient::new(options)
}

/// Create a client that uses the HTTP transport with the given credentials.
pub fn create_http_error_client(
    convex_url: impl Into<String>,
    convex_secret: impl Into<String>,
    options: ClientOptions,
) -> Result<ErrorClient, ClientError> {
    ErrorClient::new(ClientOptions {
        transport: TransportKind::Http,
        convex_url: Some(convex_url.into()),
        convex_secret: Some(convex_secret.into()),
        ..options
    })
}
