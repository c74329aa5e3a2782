//! HTTP-specific error types for the Ghost Admin API client.
//!
//! # Error Handling
//!
//! Every failure is fatal to the operation that hit it. There is no retry:
//!
//! - [`HttpResponseError`]: The service answered with a non-2xx status
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError::Network`]: The request never got an HTTP answer
//! - [`HttpError::Decode`]: A 2xx answer whose body is empty or not JSON
//! - [`HttpError`]: Unified error type encompassing all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use ghost_admin::clients::{HttpClient, HttpError, Transport};
//!
//! match client.execute(&request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("Rejected {}: {}", e.code, e.body),
//!     Err(HttpError::Decode { code, .. }) => println!("Bad JSON in {code} response"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Error returned when the Admin API answers with a non-2xx status.
///
/// Carries the status code and the raw response body as diagnostic context.
/// `message` holds the first `errors[].message` of Ghost's error envelope
/// when the body has one.
///
/// # Example
///
/// ```rust
/// use ghost_admin::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     body: r#"{"errors":[{"message":"Post not found."}]}"#.to_string(),
///     message: Some("Post not found.".to_string()),
///     error_reference: None,
/// };
///
/// assert_eq!(error.to_string(), "Admin API returned 404: Post not found.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
    /// The error message extracted from the response body, if any.
    pub message: Option<String>,
    /// Error id reported by Ghost (`errors[].id`), useful when filing reports.
    pub error_reference: Option<String>,
}

impl fmt::Display for HttpResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.message.as_deref().unwrap_or(&self.body);
        write!(f, "Admin API returned {}: {detail}", self.code)
    }
}

impl std::error::Error for HttpResponseError {}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request carries no admin token.
    #[error("Request to '{path}' is missing the Authorization header.")]
    MissingAuthorization {
        /// The path of the unauthenticated request.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response whose body is empty or not valid JSON.
    #[error("Failed to decode {code} response body as JSON: {source}")]
    Decode {
        /// The HTTP status code of the response.
        code: u16,
        /// The raw response body.
        body: String,
        /// The JSON parse error.
        #[source]
        source: serde_json::Error,
    },
}
