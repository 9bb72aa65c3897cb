//! Payload enrichment.
//!
//! # Responsibilities
//! - Merge the client's default context under each report's own context
//! - Fill in the client's default environment
//! - Decide which optional keys reach the wire
//! - Derive the queue idempotency and concurrency keys

use serde::{Deserialize, Serialize};

use crate::config::ClientOptions;
use crate::payload::types::{Context, Environment, ErrorIdentity, ErrorPayload, Severity};

/// Which of `context` and `environment` are serialized.
///
/// Every other optional field is omitted when unset, regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Always send `context` and `environment`, even when empty or default.
    #[default]
    Always,
    /// Send `context` only if the report or the client defaults carry one,
    /// and `environment` only if the report sets it or the default is not
    /// production.
    NonEmpty,
}

/// The payload as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPayload {
    pub company_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EnrichedPayload {
    /// The error code, else the service name, else an empty string.
    pub fn identity_key(&self) -> &str {
        self.error_code
            .as_deref()
            .or(self.service.as_deref())
            .unwrap_or("")
    }

    /// Key the queue uses to serialize related reports.
    pub fn concurrency_key(&self) -> String {
        format!("{}-{}", self.company_code, self.identity_key())
    }

    /// Key the queue uses to drop duplicate submissions.
    pub fn idempotency_key(&self, submitted_at_ms: u128) -> String {
        format!("{}-{}", self.concurrency_key(), submitted_at_ms)
    }
}

/// Merge `overrides` on top of `defaults`. Keys in `overrides` win.
pub fn merge_context(defaults: &Context, overrides: Option<&Context>) -> Context {
    let mut merged = defaults.clone();
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Applies client defaults to outgoing payloads.
#[derive(Debug, Clone)]
pub struct Enricher {
    default_context: Context,
    environment: Environment,
    policy: FieldPolicy,
}

impl Enricher {
    pub fn new(default_context: Context, environment: Environment, policy: FieldPolicy) -> Self {
        Self {
            default_context,
            environment,
            policy,
        }
    }

    pub fn from_options(options: &ClientOptions) -> Self {
        Self::new(
            options.default_context.clone(),
            options.environment,
            options.field_policy,
        )
    }

    /// Environment a payload is reported under, whether or not it is serialized.
    pub fn effective_environment(&self, payload: &ErrorPayload) -> Environment {
        payload.environment.unwrap_or(self.environment)
    }

    pub fn enrich(&self, payload: ErrorPayload) -> EnrichedPayload {
        let context = match self.policy {
            FieldPolicy::Always => Some(merge_context(&self.default_context, payload.context.as_ref())),
            FieldPolicy::NonEmpty => {
                if payload.context.is_some() || !self.default_context.is_empty() {
                    Some(merge_context(&self.default_context, payload.context.as_ref()))
                } else {
                    None
                }
            }
        };

        let environment = match self.policy {
            FieldPolicy::Always => Some(self.effective_environment(&payload)),
            FieldPolicy::NonEmpty => payload
                .environment
                .or((self.environment != Environment::Production).then_some(self.environment)),
        };

        let (error_code, service) = match payload.identity {
            ErrorIdentity::Known(code) => (Some(code), None),
            ErrorIdentity::Service(service) => (None, Some(service)),
            ErrorIdentity::Unclassified => (None, None),
        };

        EnrichedPayload {
            company_code: payload.company_code,
            message: payload.message,
            error_code,
            service,
            context,
            stack_trace: payload.stack_trace,
            url: payload.url,
            user_agent: payload.user_agent,
            user_id: payload.user_id,
            session_id: payload.session_id,
            environment,
            severity: payload.severity,
            tags: payload.tags,
            location: payload.location,
        }
    }
}
