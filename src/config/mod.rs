//! Configuration types for the Cronbeat client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: immutable settings shared by every call a client makes
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`]
//! - [`JobKey`]: a validated job key
//! - [`BaseUrl`]: a validated service origin
//! - [`EndStatus`]: the terminal status reported by `end`
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use cronbeat::{BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://ping.example.com/").unwrap())
//!     .timeout(Duration::from_secs(2))
//!     .max_retries(4)
//!     .build();
//!
//! assert_eq!(config.base_url().as_ref(), "https://ping.example.com");
//! assert_eq!(config.max_retries(), 4);
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, EndStatus, JobKey};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{
    BackoffPolicy, JitterSource, ReqwestTransport, Sleeper, ThreadRngJitter, TokioSleeper,
    Transport, SDK_VERSION,
};

/// Default per-attempt request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default backoff base delay.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);

/// Default upper bound of the random jitter added to each backoff delay.
pub const DEFAULT_JITTER_BOUND: Duration = Duration::from_millis(100);

/// Settings for a [`PingClient`](crate::PingClient).
///
/// Fixed at construction and never mutated. Cloning is cheap: the transport,
/// sleeper and jitter source are reference counted.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: BaseUrl,
    timeout: Duration,
    max_retries: u32,
    backoff: BackoffPolicy,
    user_agent: String,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    jitter_source: Arc<dyn JitterSource>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL, without trailing slashes.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the maximum number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the backoff policy.
    #[must_use]
    pub const fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// Returns the identifying `user-agent` value sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Returns the sleeper used between retries.
    #[must_use]
    pub fn sleeper(&self) -> &dyn Sleeper {
        self.sleeper.as_ref()
    }

    /// Returns the jitter source used for backoff delays.
    #[must_use]
    pub fn jitter_source(&self) -> &dyn JitterSource {
        self.jitter_source.as_ref()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfigBuilder::new().build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff", &self.backoff)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Every field is optional.
///
/// # Defaults
///
/// - `base_url`: `https://api.cronbeat.io`
/// - `timeout`: 5000 ms
/// - `max_retries`: 2
/// - `backoff_base`: 250 ms
/// - `jitter_bound`: 100 ms
/// - `user_agent`: `cronbeat-rust/<version>`
/// - `transport`: [`ReqwestTransport`]
/// - `sleeper`: [`TokioSleeper`]
/// - `jitter_source`: [`ThreadRngJitter`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    backoff_base: Option<Duration>,
    jitter_bound: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    sleeper: Option<Arc<dyn Sleeper>>,
    jitter_source: Option<Arc<dyn JitterSource>>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of retries after the first attempt.
    ///
    /// `0` disables retries.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the backoff base delay.
    #[must_use]
    pub const fn backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = Some(base);
        self
    }

    /// Sets the upper bound of the random jitter added to each delay.
    #[must_use]
    pub const fn jitter_bound(mut self, bound: Duration) -> Self {
        self.jitter_bound = Some(bound);
        self
    }

    /// Sets the identifying `user-agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the transport used to issue requests.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the sleeper used to wait between retries.
    #[must_use]
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Sets the source of backoff jitter.
    #[must_use]
    pub fn jitter_source(mut self, jitter_source: Arc<dyn JitterSource>) -> Self {
        self.jitter_source = Some(jitter_source);
        self
    }

    /// Builds the [`ClientConfig`], filling unset fields with defaults.
    ///
    /// A [`ReqwestTransport`] is created only if no transport was set.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let backoff = BackoffPolicy::new(
            self.backoff_base.unwrap_or(DEFAULT_BACKOFF_BASE),
            self.jitter_bound.unwrap_or(DEFAULT_JITTER_BOUND),
        );

        ClientConfig {
            base_url: self.base_url.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            backoff,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("cronbeat-rust/{SDK_VERSION}")),
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
            sleeper: self.sleeper.unwrap_or_else(|| Arc::new(TokioSleeper)),
            jitter_source: self
                .jitter_source
                .unwrap_or_else(|| Arc::new(ThreadRngJitter)),
        }
    }
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_base", &self.backoff_base)
            .field("jitter_bound", &self.jitter_bound)
            .field("user_agent", &self.user_agent)
            .field("transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}
