//! Task-trigger queue transport.
//!
//! # Responsibilities
//! - Enqueue the ingestion task with the enriched payload
//! - Derive idempotency and concurrency keys for the queue
//! - Return the run handle without waiting for the job
//!
//! # Design Decisions
//! - No client-side timeout; the call only waits for enqueue acknowledgement
//! - The API key is never logged

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ClientError;
use crate::config::{TransportKind, TriggerConfig};
use crate::payload::{EnrichedPayload, Environment};
use crate::transport::{Delivery, RunHandle, Submission, Transport, TransportError};

pub const API_KEY_ENV: &str = "TRIGGER_SECRET_KEY";
pub const QUEUE_NAME: &str = "error-ingestion";
pub const QUEUE_CONCURRENCY_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
struct TriggerRequest<'a> {
    payload: &'a EnrichedPayload,
    context: TriggerContext,
    options: TriggerOptions,
}

#[derive(Debug, Serialize)]
struct TriggerContext {
    environment: Environment,
    timestamp: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerOptions {
    idempotency_key: String,
    concurrency_key: String,
    queue: QueueOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueueOptions {
    name: &'static str,
    concurrency_limit: u32,
}

/// Enqueues reports as ingestion tasks.
#[derive(Clone)]
pub struct TriggerTransport {
    client: reqwest::Client,
    trigger_url: String,
    api_key: String,
}

impl TriggerTransport {
    pub fn new(api_url: &str, task_id: &str, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self {
            client,
            trigger_url: format!(
                "{}/api/v1/tasks/{}/trigger",
                api_url.trim_end_matches('/'),
                task_id
            ),
            api_key,
        })
    }

    /// Build from options, falling back to `TRIGGER_SECRET_KEY` for the key.
    pub fn from_config(config: &TriggerConfig) -> Result<Self, ClientError> {
        let api_key = resolve_api_key(config, std::env::var(API_KEY_ENV).ok())?;
        Self::new(&config.api_url, &config.task_id, api_key)
    }

    pub fn trigger_url(&self) -> &str {
        &self.trigger_url
    }

    fn request_body<'a>(submission: &'a Submission) -> TriggerRequest<'a> {
        TriggerRequest {
            payload: &submission.payload,
            context: TriggerContext {
                environment: submission.environment,
                timestamp: submission.unix_secs(),
            },
            options: TriggerOptions {
                idempotency_key: submission.idempotency_key(),
                concurrency_key: submission.concurrency_key(),
                queue: QueueOptions {
                    name: QUEUE_NAME,
                    concurrency_limit: QUEUE_CONCURRENCY_LIMIT,
                },
            },
        }
    }
}

/// Pick the configured key, else `env_key`. Empty values count as missing.
pub fn resolve_api_key(config: &TriggerConfig, env_key: Option<String>) -> Result<String, ClientError> {
    config
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .or_else(|| env_key.filter(|key| !key.is_empty()))
        .ok_or(ClientError::MissingApiKey)
}

#[async_trait]
impl Transport for TriggerTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Trigger
    }

    async fn deliver(&self, submission: &Submission) -> Result<Delivery, TransportError> {
        tracing::debug!(url = %self.trigger_url, "Enqueueing ingestion task");

        let response = self
            .client
            .post(&self.trigger_url)
            .bearer_auth(&self.api_key)
            .json(&Self::request_body(submission))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))?;
        let id = body
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or(TransportError::MissingField("id"))?;

        Ok(Delivery::Queued(RunHandle { id: id.to_string() }))
    }
}

impl std::fmt::Debug for TriggerTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerTransport")
            .field("trigger_url", &self.trigger_url)
            .finish()
    }
}
