//! Maps transport-native responses into [`ReportResult`].
//!
//! The queue transport only sees an enqueue acknowledgement, so it can never
//! observe server-side deduplication and always reports `created_new`.

use crate::report::types::{ReportAction, ReportResult};
use crate::transport::{Delivery, HttpReportResponse, RunHandle};

pub fn normalize(delivery: Delivery) -> ReportResult {
    match delivery {
        Delivery::Queued(handle) => from_handle(handle),
        Delivery::Http(response) => from_http(response),
    }
}

fn from_handle(handle: RunHandle) -> ReportResult {
    created_new("trigger", handle.id)
}

fn from_http(response: HttpReportResponse) -> ReportResult {
    let HttpReportResponse {
        success,
        trigger_id,
        message,
        error,
    } = response;

    match trigger_id {
        Some(id) if success => ReportResult {
            message,
            error,
            ..created_new("http", id)
        },
        _ => ReportResult {
            success,
            message,
            error,
            ..ReportResult::default()
        },
    }
}

fn created_new(prefix: &str, id: String) -> ReportResult {
    ReportResult {
        success: true,
        group_code: Some(format!("{}-{}", prefix, id)),
        group_id: Some(id.clone()),
        occurrence_id: Some(id),
        action: Some(ReportAction::CreatedNew),
        ..ReportResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_queue_handle() {
        let result = normalize(Delivery::Queued(RunHandle { id: "abc".into() }));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "groupId": "abc",
                "groupCode": "trigger-abc",
                "occurrenceId": "abc",
                "action": "created_new"
            })
        );
    }

    #[test]
    fn test_http_success() {
        let result = normalize(Delivery::Http(HttpReportResponse {
            success: true,
            trigger_id: Some("run_9".into()),
            message: Some("Error queued".into()),
            error: None,
        }));
        assert!(result.success);
        assert_eq!(result.group_id.as_deref(), Some("run_9"));
        assert_eq!(result.group_code.as_deref(), Some("http-run_9"));
        assert_eq!(result.occurrence_id.as_deref(), Some("run_9"));
        assert_eq!(result.action, Some(ReportAction::CreatedNew));
        assert_eq!(result.message.as_deref(), Some("Error queued"));
    }

    #[test]
    fn test_http_server_failure_passes_through() {
        let result = normalize(Delivery::Http(HttpReportResponse {
            success: false,
            trigger_id: None,
            message: Some("companyCode is required".into()),
            error: Some(ErrorKind::Validation),
        }));
        assert_eq!(
            result,
            ReportResult::failure(ErrorKind::Validation, "companyCode is required")
        );
    }

    #[test]
    fn test_http_success_without_trigger_id() {
        let result = normalize(Delivery::Http(HttpReportResponse {
            success: true,
            trigger_id: None,
            message: None,
            error: None,
        }));
        assert!(result.success);
        assert!(result.group_id.is_none());
        assert!(result.action.is_none());
    }
}
