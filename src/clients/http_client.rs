//! Default HTTP transport backed by `reqwest`.
//!
//! This module provides [`ReqwestTransport`], the [`Transport`] used when no
//! other transport is configured.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::RemoteError;
use crate::clients::http_request::{HttpMethod, TransportRequest};
use crate::clients::http_response::TransportResponse;
use crate::clients::transport::Transport;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// [`Transport`] that sends requests with a shared `reqwest::Client`.
///
/// The per-request timeout from [`TransportRequest::timeout`] is applied to
/// each attempt. Timeouts, connection failures and body read failures are
/// reported as `NETWORK_ERROR`.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync` and cheap to clone; clones share one
/// connection pool.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cronbeat::clients::ReqwestTransport;
/// use cronbeat::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .transport(Arc::new(ReqwestTransport::new()))
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed `reqwest::Client`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Creates a transport around an existing `reqwest::Client`.
    ///
    /// Use this to share a connection pool or to apply proxy settings.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Collects response headers into a lower-cased map.
    ///
    /// Repeated headers are joined with `", "`.
    fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut result: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default();
            result
                .entry(key)
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        result
    }

    fn network_error(error: reqwest::Error, request: &TransportRequest) -> RemoteError {
        let message = if error.is_timeout() {
            format!(
                "Request to {} timed out after {}ms",
                request.url,
                request.timeout.as_millis()
            )
        } else {
            format!("Request to {} failed: {error}", request.url)
        };
        RemoteError::network(message).with_source(error)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, RemoteError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let res = req_builder
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| Self::network_error(e, &request))?;

        let status = res.status().as_u16();
        let headers = Self::collect_headers(res.headers());
        let body = res
            .text()
            .await
            .map_err(|e| Self::network_error(e, &request))?;

        Ok(TransportResponse::new(status, body, headers))
    }
}
