//! Request types handed to a [`Transport`](crate::clients::Transport).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP methods a transport must be able to issue.
///
/// Every lifecycle action uses [`HttpMethod::Post`]; the remaining methods
/// exist so that a transport implementation is not tied to one verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully resolved HTTP request.
///
/// The URL is absolute and the headers are final. The transport must abort
/// the request once `timeout` elapses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Request headers, keyed by lower-case name.
    pub headers: HashMap<String, String>,
    /// Serialized JSON body, if any.
    pub body: Option<String>,
    /// Hard deadline for this single attempt.
    pub timeout: Duration,
}

impl TransportRequest {
    /// Creates a POST request with no headers or body.
    #[must_use]
    pub fn post(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout,
        }
    }

    /// Replaces the request headers.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the path portion of the URL, without scheme, host or query.
    ///
    /// ```rust
    /// use cronbeat::clients::TransportRequest;
    /// use std::time::Duration;
    ///
    /// let request = TransportRequest::post(
    ///     "https://api.cronbeat.io/ping/abc123de/start",
    ///     Duration::from_secs(5),
    /// );
    /// assert_eq!(request.path(), "/ping/abc123de/start");
    /// ```
    #[must_use]
    pub fn path(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        let path = without_scheme
            .find('/')
            .map_or("", |i| &without_scheme[i..]);
        path.split(['?', '#']).next().unwrap_or_default()
    }
}
