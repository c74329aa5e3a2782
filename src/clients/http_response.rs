//! HTTP response types for the Ghost Admin API client.
//!
//! This module provides the [`HttpResponse`] type returned by a successful
//! [`Transport`](crate::clients::Transport) call, and the parser for Ghost's
//! error envelope used to describe rejected calls.

use std::collections::HashMap;

use serde::Deserialize;

/// A successful HTTP response from the Admin API.
///
/// The body has already been decoded as JSON. An empty 2xx body is a
/// decode failure, not a response.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in `200..=299`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// A single entry of Ghost's `{"errors": [...]}` envelope.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ApiErrorDetail {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Additional context supplied by the service.
    #[serde(default)]
    pub context: Option<String>,
    /// Error class, e.g. `NotFoundError` or `UpdateCollisionError`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Error id for support requests.
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    errors: Vec<ApiErrorDetail>,
}

/// Extracts the first error entry from a raw response body, if the body is a
/// Ghost error envelope.
///
/// # Example
///
/// ```rust
/// use ghost_admin::clients::parse_error_detail;
///
/// let detail = parse_error_detail(
///     r#"{"errors":[{"message":"Saving failed!","type":"UpdateCollisionError"}]}"#,
/// )
/// .unwrap();
/// assert_eq!(detail.kind.as_deref(), Some("UpdateCollisionError"));
/// assert!(parse_error_detail("<html>Bad Gateway</html>").is_none());
/// ```
#[must_use]
pub fn parse_error_detail(body: &str) -> Option<ApiErrorDetail> {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()?
        .errors
        .into_iter()
        .next()
}
