//! Option validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the selected transport has its credentials
//! - Validate URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientOptions → Result<(), Vec<ValidationError>>
//! - Queue API key is resolved at construction (it may come from the environment)

use thiserror::Error;
use url::Url;

use crate::config::schema::{ClientOptions, TransportKind};

/// A single semantic problem with a set of options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Convex URL is required for HTTP transport")]
    MissingConvexUrl,

    #[error("Convex API secret is required for HTTP transport")]
    MissingConvexSecret,

    #[error("{field} '{value}' is not a valid URL: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("trigger.task_id must not be empty")]
    EmptyTaskId,
}

/// Check options for problems that would make a client unusable.
pub fn validate_options(options: &ClientOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match options.transport {
        TransportKind::Http => {
            match options.convex_url.as_deref() {
                None | Some("") => errors.push(ValidationError::MissingConvexUrl),
                Some(url) => check_url("convex_url", url, &mut errors),
            }
            if options.convex_secret.as_deref().map_or(true, str::is_empty) {
                errors.push(ValidationError::MissingConvexSecret);
            }
            if options.timeout_ms == 0 {
                errors.push(ValidationError::ZeroTimeout);
            }
        }
        TransportKind::Trigger => {
            check_url("trigger.api_url", &options.trigger.api_url, &mut errors);
            if options.trigger.task_id.trim().is_empty() {
                errors.push(ValidationError::EmptyTaskId);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = Url::parse(value) {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trigger_options_are_valid() {
        assert!(validate_options(&ClientOptions::default()).is_ok());
    }

    #[test]
    fn test_http_requires_credentials() {
        let options = ClientOptions {
            transport: TransportKind::Http,
            ..ClientOptions::default()
        };
        let errors = validate_options(&options).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingConvexUrl, ValidationError::MissingConvexSecret]
        );
    }

    #[test]
    fn test_http_missing_secret_only() {
        let mut options = ClientOptions::http("https://example.convex.site", "");
        options.convex_secret = None;
        let errors = validate_options(&options).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingConvexSecret]);
    }

    #[test]
    fn test_reports_all_errors() {
        let mut options = ClientOptions::http("not a url", "secret");
        options.timeout_ms = 0;
        let errors = validate_options(&options).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidUrl { field: "convex_url", .. }));
        assert_eq!(errors[1], ValidationError::ZeroTimeout);
    }

    #[test]
    fn test_trigger_task_id_and_url() {
        let mut options = ClientOptions::default();
        options.trigger.task_id = "  ".into();
        options.trigger.api_url = "::".into();
        let errors = validate_options(&options).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyTaskId));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidUrl { field: "trigger.api_url", .. })));
    }
}
