//! Response types returned by a [`Transport`](crate::clients::Transport).
//!
//! Also home to [`decode_body`], the total JSON decoding step the request
//! pipeline applies to every response body.

use std::collections::HashMap;

use serde_json::{json, Value};

/// Message placed in the synthetic body substituted for unparseable JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response";

/// A raw HTTP response as produced by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text, possibly empty.
    pub body: String,
    /// Response headers, keyed by lower-case name.
    pub headers: HashMap<String, String>,
}

impl TransportResponse {
    /// Creates a response, lower-casing every header name.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>, headers: HashMap<String, String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(key, value)| (key.to_ascii_lowercase(), value))
            .collect();

        Self {
            status,
            body: body.into(),
            headers,
        }
    }

    /// Creates a response carrying a JSON body and no headers.
    ///
    /// ```rust
    /// use cronbeat::clients::TransportResponse;
    /// use serde_json::json;
    ///
    /// let response = TransportResponse::json(200, &json!({"status": "success"}));
    /// assert!(response.is_success());
    /// assert_eq!(response.body, r#"{"status":"success"}"#);
    /// ```
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string(), HashMap::new())
    }

    /// Returns `true` if the status is in `200..300`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns a header value. Names are matched in lower case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the `x-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}

/// Decodes a response body as JSON without ever failing.
///
/// - Empty or whitespace-only text decodes to `{}`.
/// - Text that is not valid JSON decodes to
///   `{"message": "Invalid JSON response"}`.
/// - Anything else decodes to the parsed value, which need not be an object.
#[must_use]
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": INVALID_JSON_MESSAGE }))
}
