//! The transport contract the request pipeline depends on.
//!
//! A [`Transport`] issues one timed HTTP request and reports the raw result.
//! It knows nothing about retries, classification or job semantics.
//!
//! Two kinds of value satisfy the contract:
//!
//! - any type implementing the trait, such as
//!   [`ReqwestTransport`](crate::clients::ReqwestTransport);
//! - any `Fn(TransportRequest) -> impl Future<Output = Result<TransportResponse, RemoteError>>`
//!   closure, through a blanket implementation.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cronbeat::clients::{TransportRequest, TransportResponse};
//! use cronbeat::{ClientConfig, PingClient};
//!
//! let transport = |_request: TransportRequest| async {
//!     Ok::<_, cronbeat::RemoteError>(TransportResponse::new(200, "{}", Default::default()))
//! };
//!
//! let config = ClientConfig::builder()
//!     .transport(Arc::new(transport))
//!     .build();
//! let client = PingClient::new("abc123de", config).unwrap();
//! assert_eq!(client.job_key().as_ref(), "abc123de");
//! ```

use std::future::Future;

use async_trait::async_trait;

use crate::clients::errors::RemoteError;
use crate::clients::http_request::TransportRequest;
use crate::clients::http_response::TransportResponse;

/// Issues HTTP requests on behalf of the client.
///
/// # Contract
///
/// - Return `Ok` for every response that arrived, whatever its status.
/// - Enforce `request.timeout` as a hard deadline.
/// - On timeout or connection failure, return a [`RemoteError`] with
///   [`ErrorCode::NetworkError`](crate::ErrorCode::NetworkError) and
///   `retryable = true`. Any other error code is treated as final and is not
///   retried.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes a single request attempt.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, RemoteError>;
}

#[async_trait]
impl<F, Fut> Transport for F
where
    F: Fn(TransportRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<TransportResponse, RemoteError>> + Send + 'static,
{
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, RemoteError> {
        (self)(request).await
    }
}
