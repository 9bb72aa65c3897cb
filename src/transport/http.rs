//! Direct HTTP transport.
//!
//! # Responsibilities
//! - POST the enriched payload to the endpoint for the report kind
//! - Authenticate with a bearer secret
//! - Abort the exchange after the configured timeout
//!
//! # Design Decisions
//! - The timeout wraps the whole exchange (connect, send, read body)
//! - Non-2xx is a retryable failure carrying the body's `message`
//! - A 2xx with `success: false` is the backend's verdict and is not retried

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::client::ClientError;
use crate::config::TransportKind;
use crate::payload::EnrichedPayload;
use crate::transport::{Delivery, HttpReportResponse, Submission, Transport, TransportError};

/// Posts reports to the ingestion HTTP API.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    secret: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport. Any trailing slash on `base_url` is stripped.
    pub fn new(base_url: &str, secret: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret: secret.into(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one request to `endpoint`, bounded by the configured timeout.
    pub async fn post(
        &self,
        endpoint: &str,
        payload: &EnrichedPayload,
    ) -> Result<HttpReportResponse, TransportError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "Posting report");

        match timeout(self.timeout, self.exchange(&url, payload)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "Report request timed out");
                Err(TransportError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    async fn exchange(
        &self,
        url: &str,
        payload: &EnrichedPayload,
    ) -> Result<HttpReportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.secret)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }

    async fn deliver(&self, submission: &Submission) -> Result<Delivery, TransportError> {
        self.post(submission.kind.endpoint(), &submission.payload)
            .await
            .map(Delivery::Http)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let transport =
            HttpTransport::new("https://example.convex.site/", "secret", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url(), "https://example.convex.site");
    }

    #[test]
    fn test_debug_hides_secret() {
        let transport =
            HttpTransport::new("https://example.convex.site", "s3cret", Duration::from_secs(1)).unwrap();
        assert!(!format!("{:?}", transport).contains("s3cret"));
    }
}
