//! Configuration schema definitions.
//!
//! This module defines the complete option set for an error reporting client.
//! All types derive Serde traits so options can be loaded from TOML files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::payload::{Context, Environment, FieldPolicy};

pub const DEFAULT_TASK_ID: &str = "ingest-error";
pub const DEFAULT_TRIGGER_API_URL: &str = "https://api.trigger.dev";

/// Which transport delivers reports to the ingestion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Task-trigger queue API.
    #[default]
    Trigger,
    /// Direct HTTP API on a Convex deployment.
    Http,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Trigger => "trigger",
            TransportKind::Http => "http",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trigger" => Ok(TransportKind::Trigger),
            "http" => Ok(TransportKind::Http),
            other => Err(format!("unknown transport '{}'", other)),
        }
    }
}

/// Root options for an error reporting client.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Transport selector.
    pub transport: TransportKind,

    /// Queue transport settings.
    pub trigger: TriggerConfig,

    /// Convex deployment URL (http transport).
    pub convex_url: Option<String>,

    /// Convex API secret (http transport).
    pub convex_secret: Option<String>,

    /// Total attempt budget per report, including the first try.
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub retry_delay_ms: u64,

    /// Optional ceiling on a single backoff delay in milliseconds.
    pub max_retry_delay_ms: Option<u64>,

    /// Per-request timeout in milliseconds (http transport).
    pub timeout_ms: u64,

    /// Environment used when a report does not set one.
    pub environment: Environment,

    /// Context merged under every report's own context.
    pub default_context: Context,

    /// Whether `context` and `environment` are always serialized.
    pub field_policy: FieldPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            transport: TransportKind::Trigger,
            trigger: TriggerConfig::default(),
            convex_url: None,
            convex_secret: None,
            max_retries: 3,
            retry_delay_ms: 1000,
            max_retry_delay_ms: None,
            timeout_ms: 10_000,
            environment: Environment::Production,
            default_context: Context::new(),
            field_policy: FieldPolicy::Always,
        }
    }
}

impl ClientOptions {
    /// Options for the http transport with the given credentials.
    pub fn http(convex_url: impl Into<String>, convex_secret: impl Into<String>) -> Self {
        Self {
            transport: TransportKind::Http,
            convex_url: Some(convex_url.into()),
            convex_secret: Some(convex_secret.into()),
            ..Self::default()
        }
    }

    /// Options for the queue transport with the given API key.
    pub fn trigger(api_key: impl Into<String>) -> Self {
        Self {
            transport: TransportKind::Trigger,
            trigger: TriggerConfig {
                api_key: Some(api_key.into()),
                ..TriggerConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("transport", &self.transport)
            .field("trigger", &self.trigger)
            .field("convex_url", &self.convex_url)
            .field("convex_secret", &self.convex_secret.as_ref().map(|_| "<redacted>"))
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("max_retry_delay_ms", &self.max_retry_delay_ms)
            .field("timeout_ms", &self.timeout_ms)
            .field("environment", &self.environment)
            .field("default_context", &self.default_context)
            .field("field_policy", &self.field_policy)
            .finish()
    }
}

/// Queue transport configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Queue API key. Falls back to `TRIGGER_SECRET_KEY` when unset.
    pub api_key: Option<String>,

    /// Task that ingests reports.
    pub task_id: String,

    /// Queue API base URL.
    pub api_url: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            task_id: DEFAULT_TASK_ID.to_string(),
            api_url: DEFAULT_TRIGGER_API_URL.to_string(),
        }
    }
}

impl fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("task_id", &self.task_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}
