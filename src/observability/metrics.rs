//! Metrics collection.
//!
//! # Metrics
//! - `error_sdk_attempts_total` (counter): delivery attempts by transport, outcome
//! - `error_sdk_reports_total` (counter): finished reports by transport, outcome
//! - `error_sdk_report_duration_seconds` (histogram): time per report, retries included
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the host application installs a recorder
//! - Without a recorder every call is a no-op

use std::time::Instant;

pub fn record_attempt(transport: &'static str, success: bool) {
    metrics::counter!(
        "error_sdk_attempts_total",
        "transport" => transport,
        "outcome" => outcome(success)
    )
    .increment(1);
}

pub fn record_report(transport: &'static str, success: bool, started: Instant) {
    metrics::counter!(
        "error_sdk_reports_total",
        "transport" => transport,
        "outcome" => outcome(success)
    )
    .increment(1);
    metrics::histogram!("error_sdk_report_duration_seconds", "transport" => transport)
        .record(started.elapsed().as_secs_f64());
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}
