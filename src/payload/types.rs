//! Error payload data model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Free-form context attached to a report.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Deployment environment a report originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Caller-assigned severity, overriding server-side classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// How the reported error is identified.
///
/// A known error carries a pre-classified code; a service error names the
/// failing service and asks the backend to classify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorIdentity {
    Known(String),
    Service(String),
    /// Neither code nor service. The backend decides whether to accept it.
    Unclassified,
}

impl ErrorIdentity {
    /// The code or service name, or an empty string.
    pub fn key(&self) -> &str {
        match self {
            ErrorIdentity::Known(code) => code,
            ErrorIdentity::Service(service) => service,
            ErrorIdentity::Unclassified => "",
        }
    }
}

/// A single error report as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// Identifier of the reporting tenant.
    pub company_code: String,
    /// Human readable description.
    pub message: String,
    pub identity: ErrorIdentity,
    pub context: Option<Context>,
    pub stack_trace: Option<String>,
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub environment: Option<Environment>,
    pub severity: Option<Severity>,
    pub tags: Option<Vec<String>>,
    /// Source location, for debugging.
    pub location: Option<String>,
}

impl ErrorPayload {
    /// Create an unclassified payload with only the required fields.
    pub fn new(company_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            company_code: company_code.into(),
            message: message.into(),
            identity: ErrorIdentity::Unclassified,
            context: None,
            stack_trace: None,
            url: None,
            user_agent: None,
            user_id: None,
            session_id: None,
            environment: None,
            severity: None,
            tags: None,
            location: None,
        }
    }

    /// Payload for an error with a known code.
    pub fn known(
        company_code: impl Into<String>,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(company_code, message).with_identity(ErrorIdentity::Known(error_code.into()))
    }

    /// Payload for a service error that the backend should classify.
    pub fn service(
        company_code: impl Into<String>,
        service: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(company_code, message).with_identity(ErrorIdentity::Service(service.into()))
    }

    pub fn with_identity(mut self, identity: ErrorIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Insert a single context entry, creating the context if needed.
    pub fn with_context_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.context
            .get_or_insert_with(Context::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key() {
        assert_eq!(ErrorIdentity::Known("E1".into()).key(), "E1");
        assert_eq!(ErrorIdentity::Service("billing".into()).key(), "billing");
        assert_eq!(ErrorIdentity::Unclassified.key(), "");
    }

    #[test]
    fn test_builder_sets_fields() {
        let payload = ErrorPayload::service("acme", "billing-svc", "weird failure")
            .with_context_entry("order", 42)
            .with_context_entry("retry", true)
            .with_tags(["db", "timeout"])
            .with_severity(Severity::High);

        assert_eq!(payload.identity, ErrorIdentity::Service("billing-svc".into()));
        let context = payload.context.unwrap();
        assert_eq!(context["order"], 42);
        assert_eq!(context["retry"], true);
        assert_eq!(payload.tags.unwrap(), vec!["db", "timeout"]);
        assert_eq!(payload.severity, Some(Severity::High));
    }

    #[test]
    fn test_environment_wire_names() {
        assert_eq!(serde_json::to_string(&Environment::Staging).unwrap(), "\"staging\"");
        assert_eq!("development".parse::<Environment>(), Ok(Environment::Development));
        assert!("prod".parse::<Environment>().is_err());
        assert_eq!(Environment::default(), Environment::Production);
    }

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!("low".parse::<Severity>(), Ok(Severity::Low));
    }
}
