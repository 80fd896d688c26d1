//! Client types for the Cronbeat monitoring service.
//!
//! # Overview
//!
//! - [`PingClient`]: reports lifecycle events for one job
//! - [`PingResult`]: normalized result of a successful call
//! - [`PingError`], [`RemoteError`], [`ErrorCode`]: failure reporting
//! - [`Transport`]: the pluggable HTTP capability the client calls through
//! - [`ReqwestTransport`]: the default, `reqwest`-backed transport
//! - [`ProgressInput`]: the accepted shapes of a progress report
//! - [`BackoffPolicy`], [`Sleeper`], [`JitterSource`]: retry timing
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)** and **5xx (Server Error)**: retried
//! - **Network errors** (timeouts, refused connections): retried
//! - **400**, **404** and any other status: returned immediately
//!
//! Up to `max_retries` retries follow the first attempt (default 2). The
//! delay before retry `n` is `backoff_base * 2^(n-1)` plus a random jitter
//! in `(0, jitter_bound]`.

mod backoff;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod ping_client;
mod ping_result;
mod progress;
mod transport;

pub use backoff::{BackoffPolicy, JitterSource, Sleeper, ThreadRngJitter, TokioSleeper};
pub use errors::{BoxError, ErrorCode, PingError, RemoteError};
pub use http_client::{ReqwestTransport, SDK_VERSION};
pub use http_request::{HttpMethod, TransportRequest};
pub use http_response::{decode_body, TransportResponse, INVALID_JSON_MESSAGE};
pub use ping_client::PingClient;
pub use ping_result::PingResult;
pub use progress::{
    truncate_message, ProgressInput, ProgressUpdate, SequenceValue, MAX_MESSAGE_CHARS,
};
pub use transport::Transport;
