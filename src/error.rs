//! Local validation errors for the Cronbeat client.
//!
//! Validation errors are raised synchronously, before any network activity,
//! when a caller-supplied value violates a local precondition. They are never
//! retried.
//!
//! # Example
//!
//! ```rust
//! use cronbeat::{JobKey, ValidationError};
//!
//! let result = JobKey::new("short");
//! assert!(matches!(result, Err(ValidationError::InvalidJobKey { .. })));
//! ```

use thiserror::Error;

/// Errors raised when a caller-supplied argument fails local validation.
///
/// Each variant carries enough context to produce a clear, actionable
/// message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The job key is not exactly 8 alphanumeric characters.
    #[error("Invalid job key '{key}'. Expected exactly 8 alphanumeric characters (A-Z, a-z, 0-9).")]
    InvalidJobKey {
        /// The rejected job key.
        key: String,
    },

    /// The end status is neither `success` nor `fail`.
    #[error("Invalid end status '{status}'. Expected 'success' or 'fail'.")]
    InvalidEndStatus {
        /// The rejected status token.
        status: String,
    },

    /// The progress sequence is negative, fractional, or not finite.
    #[error("Invalid progress sequence '{value}'. Expected a non-negative integer.")]
    InvalidProgressSequence {
        /// The rejected value, rendered as text.
        value: String,
    },

    /// The base URL is empty or has no HTTP(S) scheme.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.cronbeat.io').")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },
}
