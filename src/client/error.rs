//! Construction-time errors.

use thiserror::Error;

use crate::config::ValidationError;

/// Why a client could not be built.
///
/// These indicate unusable configuration. Reporting calls themselves never
/// fail with an error; they resolve to a `ReportResult`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid client options: {}", join(.0))]
    InvalidOptions(Vec<ValidationError>),

    #[error("Trigger.dev API key is required. Set TRIGGER_SECRET_KEY or pass trigger.api_key")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether the options failed with the given validation error.
    pub fn has(&self, error: &ValidationError) -> bool {
        matches!(self, ClientError::InvalidOptions(errors) if errors.contains(error))
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Vec<ValidationError>> for ClientError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ClientError::InvalidOptions(errors)
    }
}
