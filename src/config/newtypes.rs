//! Validated newtype wrappers for client configuration values.
//!
//! These wrappers validate their contents on construction, so an instance in
//! hand is always well-formed. Invalid values are rejected with a
//! [`ValidationError`].

use crate::error::ValidationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated Cronbeat job key.
///
/// Job keys identify a scheduled job to the monitoring service. They are
/// exactly 8 ASCII alphanumeric characters (Base62-compatible). The value is
/// neither trimmed nor case-folded.
///
/// # Serialization
///
/// `JobKey` serializes to and deserializes from its plain string form, and
/// deserialization re-runs validation:
///
/// ```rust
/// use cronbeat::JobKey;
///
/// let key = JobKey::new("abc123de").unwrap();
/// assert_eq!(serde_json::to_string(&key).unwrap(), r#""abc123de""#);
/// assert!(serde_json::from_str::<JobKey>(r#""abc""#).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JobKey(String);

impl JobKey {
    /// Required job key length.
    pub const LENGTH: usize = 8;

    /// Creates a new validated job key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJobKey`] unless the key is exactly
    /// 8 characters from `[A-Za-z0-9]`.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.len() != Self::LENGTH || !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidJobKey { key });
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for JobKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JobKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for JobKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JobKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated service base URL.
///
/// The URL must carry an `http://` or `https://` scheme and a non-empty
/// remainder. Surrounding whitespace and every trailing `/` are removed so
/// request paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use cronbeat::BaseUrl;
///
/// let url = BaseUrl::new("https://ping.example.com///").unwrap();
/// assert_eq!(url.as_ref(), "https://ping.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The production service origin.
    pub const DEFAULT: &'static str = "https://api.cronbeat.io";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidBaseUrl`] if the URL has no HTTP(S)
    /// scheme or nothing after it.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        match rest {
            Some(host) if !host.is_empty() => Ok(Self(trimmed.to_string())),
            _ => Err(ValidationError::InvalidBaseUrl { url }),
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal status of a job run, reported through `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndStatus {
    /// The run completed successfully.
    Success,
    /// The run failed.
    Fail,
}

impl EndStatus {
    /// Returns the wire token used in the `/end/{status}` path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for EndStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndStatus {
    type Err = ValidationError;

    /// Parses an end status. Matching is exact: `"Success"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "fail" => Ok(Self::Fail),
            other => Err(ValidationError::InvalidEndStatus {
                status: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_key_accepts_eight_alphanumerics() {
        for key in ["abc123de", "ABCDEFGH", "00000000", "zZ9yY8xX"] {
            let job_key = JobKey::new(key).unwrap();
            assert_eq!(job_key.as_ref(), key);
        }
    }

    #[test]
    fn test_job_key_rejects_invalid_keys() {
        let invalid = [
            "",
            "abc123d",
            "abc123def",
            "abc-123d",
            "abc 123d",
            " abc123d",
            "abc123d\n",
            "abcdéfgh",
            "абвгдежз",
        ];
        for key in invalid {
            assert!(
                matches!(JobKey::new(key), Err(ValidationError::InvalidJobKey { .. })),
                "expected {key:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_job_key_error_carries_rejected_value() {
        let err = JobKey::new("nope").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidJobKey {
                key: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_job_key_deserialization_validates() {
        let key: JobKey = serde_json::from_str(r#""Ab12Cd34""#).unwrap();
        assert_eq!(key.to_string(), "Ab12Cd34");
        assert!(serde_json::from_str::<JobKey>(r#""Ab12-d34""#).is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slashes() {
        assert_eq!(
            BaseUrl::new("https://ping.example.com/").unwrap().as_ref(),
            "https://ping.example.com"
        );
        assert_eq!(
            BaseUrl::new("http://localhost:8080/api//").unwrap().as_ref(),
            "http://localhost:8080/api"
        );
        assert_eq!(
            BaseUrl::new("  https://ping.example.com  ").unwrap().as_ref(),
            "https://ping.example.com"
        );
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("").is_err());
        assert!(BaseUrl::new("ping.example.com").is_err());
        assert!(BaseUrl::new("ftp://ping.example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("https:////").is_err());
    }

    #[test]
    fn test_base_url_default() {
        assert_eq!(BaseUrl::default().as_ref(), BaseUrl::DEFAULT);
    }

    #[test]
    fn test_end_status_parsing_is_exact() {
        assert_eq!("success".parse::<EndStatus>(), Ok(EndStatus::Success));
        assert_eq!("fail".parse::<EndStatus>(), Ok(EndStatus::Fail));

        for bad in ["Success", "FAIL", "failed", "", " success", "ok"] {
            assert!(matches!(
                bad.parse::<EndStatus>(),
                Err(ValidationError::InvalidEndStatus { .. })
            ));
        }
    }

    #[test]
    fn test_end_status_display() {
        assert_eq!(EndStatus::Success.to_string(), "success");
        assert_eq!(EndStatus::Fail.to_string(), "fail");
    }
}
