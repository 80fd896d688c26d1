//! Lifecycle client for a single monitored job.
//!
//! This module provides [`PingClient`], which validates inputs, builds the
//! request for each lifecycle action, executes it through the configured
//! [`Transport`](crate::clients::Transport) with retry and backoff, and
//! normalizes successful responses into a [`PingResult`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::errors::{ErrorCode, PingError, RemoteError};
use crate::clients::http_request::TransportRequest;
use crate::clients::http_response::decode_body;
use crate::clients::ping_result::PingResult;
use crate::clients::progress::ProgressInput;
use crate::config::{ClientConfig, EndStatus, JobKey};
use crate::error::ValidationError;

/// Client that reports the lifecycle of one scheduled job.
///
/// Each call runs its own sequential attempt loop: a request is issued, and
/// on a retryable failure the client waits `base * 2^(n-1) + jitter` before
/// attempt `n + 1`, up to `max_retries` retries.
///
/// Only `RATE_LIMITED`, `SERVER_ERROR` and `NETWORK_ERROR` failures are
/// retried. Validation failures and unknown job keys fail immediately.
///
/// # Thread Safety
///
/// `PingClient` holds no mutable state. It is `Clone + Send + Sync`, and
/// concurrent calls on one instance are independent.
///
/// # Example
///
/// ```rust,ignore
/// use cronbeat::PingClient;
///
/// let client = PingClient::with_defaults("abc123de")?;
///
/// client.start().await?;
/// client.progress(50u64, Some("halfway")).await?;
/// client.success().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PingClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    job_key: JobKey,
    config: ClientConfig,
    default_headers: HashMap<String, String>,
}

// Verify PingClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PingClient>();
};

impl PingClient {
    /// Creates a client for `job_key` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJobKey`] unless `job_key` is exactly
    /// 8 alphanumeric characters.
    pub fn new(job_key: impl Into<String>, config: ClientConfig) -> Result<Self, ValidationError> {
        let job_key = JobKey::new(job_key)?;

        let mut default_headers = HashMap::new();
        default_headers.insert("content-type".to_string(), "application/json".to_string());
        default_headers.insert("accept".to_string(), "application/json".to_string());
        default_headers.insert("user-agent".to_string(), config.user_agent().to_string());

        Ok(Self {
            inner: Arc::new(Inner {
                job_key,
                config,
                default_headers,
            }),
        })
    }

    /// Creates a client for `job_key` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJobKey`] if the key is malformed.
    pub fn with_defaults(job_key: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(job_key, ClientConfig::default())
    }

    /// Returns the validated job key.
    #[must_use]
    pub fn job_key(&self) -> &JobKey {
        &self.inner.job_key
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.inner.default_headers
    }

    /// Reports a liveness check (`POST /ping/{key}`).
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Remote`] if the request fails.
    pub async fn ping(&self) -> Result<PingResult, PingError> {
        let path = format!("/ping/{}", self.inner.job_key);
        self.execute("ping", &path, None).await
    }

    /// Reports that the job started (`POST /ping/{key}/start`).
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Remote`] if the request fails.
    pub async fn start(&self) -> Result<PingResult, PingError> {
        let path = format!("/ping/{}/start", self.inner.job_key);
        self.execute("start", &path, None).await
    }

    /// Reports that the job finished (`POST /ping/{key}/end/{status}`).
    ///
    /// `status` must be exactly `"success"` or `"fail"`.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Validation`] for any other status, without
    /// sending a request, or [`PingError::Remote`] if the request fails.
    pub async fn end(&self, status: &str) -> Result<PingResult, PingError> {
        let status: EndStatus = status.parse()?;
        self.end_with(status).await
    }

    /// Reports that the job finished with an already-parsed status.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Remote`] if the request fails.
    pub async fn end_with(&self, status: EndStatus) -> Result<PingResult, PingError> {
        let path = format!("/ping/{}/end/{status}", self.inner.job_key);
        self.execute("end", &path, None).await
    }

    /// Reports successful completion. Same as `end("success")`.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Remote`] if the request fails.
    pub async fn success(&self) -> Result<PingResult, PingError> {
        self.end_with(EndStatus::Success).await
    }

    /// Reports failed completion. Same as `end("fail")`.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Remote`] if the request fails.
    pub async fn fail(&self) -> Result<PingResult, PingError> {
        self.end_with(EndStatus::Fail).await
    }

    /// Reports progress.
    ///
    /// With a sequence number the request goes to
    /// `/ping/{key}/progress/{seq}`, otherwise to `/ping/{key}/progress`.
    /// The body is always `{"message": ...}`, with the message truncated to
    /// 255 characters. For a bare sequence or an omitted one, the message is
    /// taken from `message`; see [`ProgressInput::resolve`].
    ///
    /// ```rust,ignore
    /// client.progress(50u64, Some("halfway")).await?;
    /// client.progress(ProgressInput::with_message(50u64, "halfway"), None).await?;
    /// client.progress(None::<u64>, Some("still copying")).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Validation`] for a negative or fractional
    /// sequence, without sending a request, or [`PingError::Remote`] if the
    /// request fails.
    pub async fn progress(
        &self,
        input: impl Into<ProgressInput>,
        message: Option<&str>,
    ) -> Result<PingResult, PingError> {
        let (seq, message) = input.into().resolve(message)?;

        let path = match seq {
            Some(seq) => format!("/ping/{}/progress/{seq}", self.inner.job_key),
            None => format!("/ping/{}/progress", self.inner.job_key),
        };

        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(message));

        self.execute("progress", &path, Some(body)).await
    }

    /// Runs the attempt loop for one lifecycle call.
    async fn execute(
        &self,
        action: &str,
        path: &str,
        body: Option<Map<String, Value>>,
    ) -> Result<PingResult, PingError> {
        let config = &self.inner.config;
        let url = format!("{}{path}", config.base_url());
        let payload = body
            .filter(|fields| !fields.is_empty())
            .map(|fields| Value::Object(fields).to_string());

        let mut attempt: u32 = 0;
        loop {
            tracing::debug!(action, url = %url, attempt, "Sending Cronbeat request");

            let request = TransportRequest::post(&url, config.timeout())
                .headers(self.inner.default_headers.clone())
                .body(payload.clone());

            let error = match config.transport().execute(request).await {
                Ok(response) => {
                    let body = decode_body(&response.body);

                    if response.is_success() {
                        tracing::debug!(action, status = response.status, "Cronbeat request succeeded");
                        return Ok(PingResult::from_body(
                            action,
                            self.inner.job_key.as_ref(),
                            body,
                        ));
                    }

                    RemoteError::from_response(
                        response.status,
                        body,
                        response.request_id().map(String::from),
                    )
                }
                // Anything but a network fault is a final transport decision.
                Err(error) if error.code != ErrorCode::NetworkError => {
                    return Err(error.into());
                }
                Err(error) => error,
            };

            if !error.retryable || attempt >= config.max_retries() {
                return Err(error.into());
            }

            attempt += 1;
            let delay = config.backoff().delay(attempt, config.jitter_source());
            tracing::warn!(
                action,
                code = %error.code,
                status = ?error.http_status,
                retry = attempt,
                max_retries = config.max_retries(),
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Cronbeat request failed, retrying: {}",
                error.message
            );
            config.sleeper().sleep(delay).await;
        }
    }
}
