//! Option loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ClientOptions;
use crate::config::validation::{validate_options, ValidationError};

/// Error type for option loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate client options from a TOML file.
pub fn load_options(path: &Path) -> Result<ClientOptions, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let options: ClientOptions = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_options(&options).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), transport = %options.transport, "Client options loaded");
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TransportKind;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_config(
            r#"
            transport = "http"
            convex_url = "https://example.convex.site/"
            convex_secret = "s3cret"
            max_retries = 5
            retry_delay_ms = 250
            environment = "staging"
            "#,
        );

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.transport, TransportKind::Http);
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.retry_delay_ms, 250);
    }

    #[test]
    fn test_missing_file() {
        let err = load_options(Path::new("/nonexistent/error-sdk.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("max_retries = \"three\"");
        let err = load_options(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error() {
        let file = write_config("transport = \"http\"");
        let err = load_options(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 2));
        assert!(err.to_string().starts_with("Validation failed: Convex URL is required"));
    }
}
