//! Process-wide client.
//!
//! # Responsibilities
//! - Hold one optional `ErrorClient` for call-anywhere reporting
//! - Delegate the top-level report helpers to it
//!
//! # Design Decisions
//! - Nothing is initialized implicitly; callers own the `init` lifecycle
//! - Before `init`, helpers resolve to a `NETWORK_ERROR` result instead of panicking
//! - `init` replaces any previous client atomically; in-flight reports keep theirs
//! - Isolated `ErrorClient` instances never touch this state

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::client::{ClientError, ErrorClient};
use crate::config::ClientOptions;
use crate::payload::{Context, ErrorPayload};
use crate::report::ReportResult;

static GLOBAL_CLIENT: ArcSwapOption<ErrorClient> = ArcSwapOption::const_empty();

/// Build a client from `options` and store it as the process-wide client.
pub fn init(options: ClientOptions) -> Result<Arc<ErrorClient>, ClientError> {
    let client = Arc::new(ErrorClient::new(options)?);
    install(client.clone());
    Ok(client)
}

/// Store an already built client as the process-wide client.
pub fn install(client: Arc<ErrorClient>) {
    tracing::info!(transport = %client.transport_kind(), "Global error client installed");
    GLOBAL_CLIENT.store(Some(client));
}

/// The process-wide client, if initialized.
pub fn client() -> Option<Arc<ErrorClient>> {
    GLOBAL_CLIENT.load_full()
}

/// Drop the process-wide client.
pub fn reset() {
    GLOBAL_CLIENT.store(None);
}

pub async fn report_known_error(
    company_code: impl Into<String>,
    error_code: impl Into<String>,
    message: impl Into<String>,
    context: Option<Context>,
) -> ReportResult {
    match client() {
        Some(client) => {
            client
                .report_known_error(company_code, error_code, message, context)
                .await
        }
        None => uninitialized(),
    }
}

pub async fn report_service_error(
    company_code: impl Into<String>,
    service: impl Into<String>,
    message: impl Into<String>,
    context: Option<Context>,
) -> ReportResult {
    match client() {
        Some(client) => {
            client
                .report_service_error(company_code, service, message, context)
                .await
        }
        None => uninitialized(),
    }
}

pub async fn report_error(payload: ErrorPayload) -> ReportResult {
    match client() {
        Some(client) => client.report_error(payload).await,
        None => uninitialized(),
    }
}

fn uninitialized() -> ReportResult {
    tracing::warn!("Report dropped: global error client not initialized");
    ReportResult::uninitialized()
}
