//! Normalized result of a successful lifecycle call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of a successful (2xx) lifecycle call.
///
/// Every 2xx response maps into this shape regardless of how well-formed the
/// body is. Missing or mistyped fields fall back to defaults and the full
/// decoded body stays available in [`PingResult::raw`].
///
/// # Example
///
/// ```rust
/// use cronbeat::PingResult;
/// use serde_json::json;
///
/// let result = PingResult::from_body("ping", "abc123de", json!({
///     "timestamp": "2026-02-25 12:00:00",
///     "processing_time_ms": "3.5",
/// }));
///
/// assert!(result.ok);
/// assert_eq!(result.action, "ping");
/// assert_eq!(result.job_key, "abc123de");
/// assert_eq!(result.processing_time_ms, 3.5);
/// assert!(result.next_expected.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResult {
    /// Always `true`; failures are reported as errors instead.
    pub ok: bool,
    /// Action reported by the service, or the invoked action.
    pub action: String,
    /// Job key reported by the service, or the configured key.
    pub job_key: String,
    /// Server timestamp, passed through unparsed. Empty when absent.
    pub timestamp: String,
    /// Server-side processing time in milliseconds. Zero when absent.
    pub processing_time_ms: f64,
    /// When the service next expects to hear from the job, if it says.
    pub next_expected: Option<String>,
    /// The complete decoded response body.
    pub raw: Value,
}

impl PingResult {
    /// Normalizes a decoded response body.
    ///
    /// `action` and `job_key` are used when the body lacks string values for
    /// those fields.
    #[must_use]
    pub fn from_body(action: &str, job_key: &str, body: Value) -> Self {
        let action = string_field(&body, "action").unwrap_or(action).to_string();
        let job_key = string_field(&body, "job_key").unwrap_or(job_key).to_string();
        let timestamp = string_field(&body, "timestamp").unwrap_or_default().to_string();
        let processing_time_ms = body.get("processing_time_ms").map_or(0.0, coerce_number);
        let next_expected = string_field(&body, "next_expected").map(String::from);

        Self {
            ok: true,
            action,
            job_key,
            timestamp,
            processing_time_ms,
            next_expected,
            raw: body,
        }
    }
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

/// Coerces a JSON value to a finite number, or 0.
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or_default(),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}
