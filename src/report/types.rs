//! Unified report result.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNINITIALIZED_MESSAGE: &str =
    "Error reporting client not initialized. Call init() first.";

/// Failure categories a report can resolve to.
///
/// Only `Network` is synthesized by this client. The other categories
/// are reported by the backend and passed through verbatim, including codes
/// this client does not know, which land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "API_ERROR")]
    Api,
    #[serde(rename = "AI_ERROR")]
    Ai,
    #[serde(rename = "CONVEX_ERROR")]
    Convex,
    #[serde(untagged)]
    Other(String),
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Api => "API_ERROR",
            ErrorKind::Ai => "AI_ERROR",
            ErrorKind::Convex => "CONVEX_ERROR",
            ErrorKind::Other(code) => code,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the backend did with a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    CreatedNew,
    AddedToExisting,
    MatchedSimilar,
}

/// Outcome of a single reporting call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ReportAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl ReportResult {
    pub fn failure(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Result returned by the global helpers before `init` is called.
    pub fn uninitialized() -> Self {
        Self::failure(ErrorKind::Network, UNINITIALIZED_MESSAGE)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_wire_shape() {
        let result = ReportResult::failure(ErrorKind::Network, "boom");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "NETWORK_ERROR", "message": "boom"})
        );
    }

    #[test]
    fn test_server_error_codes() {
        for (code, kind) in [
            ("VALIDATION_ERROR", ErrorKind::Validation),
            ("API_ERROR", ErrorKind::Api),
            ("AI_ERROR", ErrorKind::Ai),
            ("CONVEX_ERROR", ErrorKind::Convex),
        ] {
            let parsed: ErrorKind = serde_json::from_value(json!(code)).unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.to_string(), code);
        }
    }

    #[test]
    fn test_unknown_error_code_kept() {
        let parsed: ErrorKind = serde_json::from_value(json!("RATE_LIMITED")).unwrap();
        assert_eq!(parsed, ErrorKind::Other("RATE_LIMITED".into()));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!("RATE_LIMITED"));
        assert_eq!(parsed.to_string(), "RATE_LIMITED");
    }

    #[test]
    fn test_action_names() {
        assert_eq!(
            serde_json::to_value(ReportAction::AddedToExisting).unwrap(),
            json!("added_to_existing")
        );
    }

    #[test]
    fn test_uninitialized() {
        let result = ReportResult::uninitialized();
        assert!(!result.is_success());
        assert_eq!(result.error, Some(ErrorKind::Network));
        assert_eq!(result.message.as_deref(), Some(UNINITIALIZED_MESSAGE));
    }
}
