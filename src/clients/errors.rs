//! Remote error types for the Cronbeat client.
//!
//! # Error Handling
//!
//! Every public client operation returns [`PingError`], a tagged union of:
//!
//! - [`ValidationError`]: a local precondition failed; no request was sent
//! - [`RemoteError`]: the request could not be completed successfully,
//!   classified by an [`ErrorCode`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cronbeat::{ErrorCode, PingClient, PingError};
//!
//! match client.start().await {
//!     Ok(result) => println!("Started at {}", result.timestamp),
//!     Err(PingError::Validation(e)) => eprintln!("Bad input: {e}"),
//!     Err(PingError::Remote(e)) if e.code == ErrorCode::NotFound => {
//!         eprintln!("Unknown job key");
//!     }
//!     Err(PingError::Remote(e)) => eprintln!("Ping failed: {e}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;

/// Boxed underlying cause of a remote failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Classification of a remote failure.
///
/// The set is closed. Each code has a fixed retryability, see
/// [`ErrorCode::is_retryable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The service rejected the request as malformed (HTTP 400).
    ValidationError,
    /// The job key is unknown to the service (HTTP 404).
    NotFound,
    /// The client is being rate limited (HTTP 429).
    RateLimited,
    /// The service failed internally (HTTP 5xx).
    ServerError,
    /// The request never produced a response (timeout, connection failure).
    NetworkError,
    /// Any other non-2xx status.
    UnknownError,
}

impl ErrorCode {
    /// Classifies a non-2xx HTTP status.
    ///
    /// Checked in order: 400, 404, 429, then any status of 500 or above.
    /// Everything else is [`ErrorCode::UnknownError`].
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::ValidationError,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            s if s >= 500 => Self::ServerError,
            _ => Self::UnknownError,
        }
    }

    /// Returns `true` if a request failing with this code may succeed when
    /// re-attempted.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::NetworkError
        )
    }

    /// Returns the wire form of the code (e.g. `"NOT_FOUND"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::RateLimited => "RATE_LIMITED",
            Self::ServerError => "SERVER_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a request could not be completed successfully.
///
/// Raised for non-2xx responses that were not retried or exhausted their
/// retries, and for transport-level failures.
///
/// # Example
///
/// ```rust
/// use cronbeat::{ErrorCode, RemoteError};
///
/// let error = RemoteError::network("connection refused");
/// assert_eq!(error.code, ErrorCode::NetworkError);
/// assert!(error.retryable);
/// assert!(error.http_status.is_none());
/// ```
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct RemoteError {
    /// Failure classification.
    pub code: ErrorCode,
    /// HTTP status of the response, absent for network failures.
    pub http_status: Option<u16>,
    /// Whether re-attempting the request may succeed.
    pub retryable: bool,
    /// Human-readable message, usually supplied by the service.
    pub message: String,
    /// Decoded response body, or `Null` when there was none.
    pub raw: serde_json::Value,
    /// Value of the `x-request-id` response header, when present.
    pub request_id: Option<String>,
    /// Underlying cause, for transport failures.
    #[source]
    pub source: Option<BoxError>,
}

impl RemoteError {
    /// Creates a retryable `NETWORK_ERROR` with no HTTP status.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NetworkError,
            http_status: None,
            retryable: true,
            message: message.into(),
            raw: serde_json::Value::Null,
            request_id: None,
            source: None,
        }
    }

    /// Creates an error with the given code and its default retryability.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            http_status: None,
            retryable: code.is_retryable(),
            message: message.into(),
            raw: serde_json::Value::Null,
            request_id: None,
            source: None,
        }
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builds the error for a non-2xx response.
    ///
    /// The message is the body's string `message` field, or a generic
    /// fallback naming the status.
    #[must_use]
    pub fn from_response(
        status: u16,
        body: serde_json::Value,
        request_id: Option<String>,
    ) -> Self {
        let code = ErrorCode::from_status(status);
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(
                || format!("Request failed with status {status}"),
                String::from,
            );

        Self {
            code,
            http_status: Some(status),
            retryable: code.is_retryable(),
            message,
            raw: body,
            request_id,
            source: None,
        }
    }
}

/// Unified error type for client operations.
#[derive(Debug, Error)]
pub enum PingError {
    /// A caller-supplied argument failed local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request failed remotely or in transport.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl PingError {
    /// Returns the remote classification, or `None` for validation errors.
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Validation(_) => None,
            Self::Remote(e) => Some(e.code),
        }
    }

    /// Returns the remote error, if this is one.
    #[must_use]
    pub const fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Validation(_) => None,
            Self::Remote(e) => Some(e),
        }
    }

    /// Returns `true` only for retryable remote errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Remote(e) => e.retryable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorCode::from_status(400), ErrorCode::ValidationError);
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(429), ErrorCode::RateLimited);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(599), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(401), ErrorCode::UnknownError);
        assert_eq!(ErrorCode::from_status(403), ErrorCode::UnknownError);
        assert_eq!(ErrorCode::from_status(409), ErrorCode::UnknownError);
        assert_eq!(ErrorCode::from_status(302), ErrorCode::UnknownError);
    }

    #[test]
    fn test_retryability_per_code() {
        assert!(!ErrorCode::ValidationError.is_retryable());
        assert!(!ErrorCode::NotFound.is_retryable());
        assert!(ErrorCode::RateLimited.is_retryable());
        assert!(ErrorCode::ServerError.is_retryable());
        assert!(ErrorCode::NetworkError.is_retryable());
        assert!(!ErrorCode::UnknownError.is_retryable());
    }

    #[test]
    fn test_error_code_wire_form() {
        assert_eq!(ErrorCode::RateLimited.to_string(), "RATE_LIMITED");
        assert_eq!(
            serde_json::to_string(&ErrorCode::NetworkError).unwrap(),
            r#""NETWORK_ERROR""#
        );
        let code: ErrorCode = serde_json::from_str(r#""UNKNOWN_ERROR""#).unwrap();
        assert_eq!(code, ErrorCode::UnknownError);
    }

    #[test]
    fn test_from_response_uses_server_message() {
        let error = RemoteError::from_response(
            404,
            json!({"status": "error", "message": "Job not found"}),
            Some("req-1".to_string()),
        );

        assert_eq!(error.code, ErrorCode::NotFound);
        assert_eq!(error.http_status, Some(404));
        assert!(!error.retryable);
        assert_eq!(error.message, "Job not found");
        assert_eq!(error.request_id.as_deref(), Some("req-1"));
        assert_eq!(error.raw["status"], "error");
        assert_eq!(error.to_string(), "NOT_FOUND: Job not found");
    }

    #[test]
    fn test_from_response_falls_back_to_generic_message() {
        let error = RemoteError::from_response(502, json!({}), None);
        assert_eq!(error.message, "Request failed with status 502");
        assert!(error.retryable);

        let error = RemoteError::from_response(418, json!({"message": 42}), None);
        assert_eq!(error.message, "Request failed with status 418");
        assert_eq!(error.code, ErrorCode::UnknownError);
    }

    #[test]
    fn test_network_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = RemoteError::network("connection failed").with_source(io);

        let source = std::error::Error::source(&error).unwrap();
        assert!(source.to_string().contains("refused"));
    }

    #[test]
    fn test_ping_error_helpers() {
        let validation: PingError = ValidationError::InvalidEndStatus {
            status: "x".to_string(),
        }
        .into();
        assert_eq!(validation.code(), None);
        assert!(!validation.is_retryable());
        assert!(validation.as_remote().is_none());

        let remote: PingError = RemoteError::network("timeout").into();
        assert_eq!(remote.code(), Some(ErrorCode::NetworkError));
        assert!(remote.is_retryable());
        assert!(remote.to_string().contains("timeout"));
    }
}
