//! Retry control.
//!
//! # Responsibilities
//! - Run one delivery attempt at a time, up to the attempt budget
//! - Sleep with exponential backoff between attempts
//! - Convert the final failure into a `NETWORK_ERROR` result
//!
//! # Design Decisions
//! - `max_attempts` counts the first try; 3 means at most 3 calls
//! - Every failure is treated as transient. A 4xx is retried like a 5xx
//! - Faults never escape; the caller always gets a `ReportResult`

use std::future::Future;
use std::time::Duration;

use crate::config::ClientOptions;
use crate::observability::metrics;
use crate::report::{ErrorKind, ReportResult};
use crate::resilience::backoff::calculate_backoff;
use crate::transport::TransportError;

pub const EXHAUSTED_MESSAGE: &str = "Failed to report error after retries";

/// Attempt budget and backoff schedule for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Option<Duration>,
}

impl RetryPolicy {
    /// `max_attempts` below 1 is raised to 1; the first attempt always runs.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: None,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn from_options(options: &ClientOptions) -> Self {
        let policy = Self::new(options.max_retries, Duration::from_millis(options.retry_delay_ms));
        match options.max_retry_delay_ms {
            Some(max_ms) => policy.with_max_delay(Duration::from_millis(max_ms)),
            None => policy,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempt `attempt` and the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.base_delay, self.max_delay)
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// `operation` receives the 1-based attempt number and must perform
    /// exactly one transport call.
    pub async fn run<F, Fut>(&self, transport: &'static str, mut operation: F) -> ReportResult
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<ReportResult, TransportError>>,
    {
        let mut last_error: Option<TransportError> = None;

        for attempt in 1..=self.max_attempts {
            match operation(attempt).await {
                Ok(result) => {
                    metrics::record_attempt(transport, true);
                    if attempt > 1 {
                        tracing::info!(attempt, "Report delivered after retry");
                    }
                    return result;
                }
                Err(e) => {
                    metrics::record_attempt(transport, false);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Report attempt failed"
                    );

                    if attempt < self.max_attempts {
                        let backoff = self.delay_after(attempt);
                        tracing::info!(attempt, delay = ?backoff, "Retrying report");
                        tokio::time::sleep(backoff).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| EXHAUSTED_MESSAGE.to_string());
        tracing::error!(attempts = self.max_attempts, last_error = %message, "Giving up on report");
        ReportResult::failure(ErrorKind::Network, message)
    }
}
