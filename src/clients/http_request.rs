//! HTTP request types for the Ghost Admin API client.
//!
//! This module provides the [`HttpRequest`] descriptor and its builder. A
//! built request is a complete description of what goes on the wire (method,
//! path, query, headers, body) and is handed to a
//! [`Transport`](crate::clients::Transport) for execution.

use std::collections::HashMap;
use std::fmt;

use crate::auth::AdminToken;
use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::multipart::MultipartForm;

/// Name of the authorization header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Name of the content type header.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Content type of JSON bodies, and of every request without a body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods used against the Admin API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// The body of a request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON document, sent as `application/json`.
    Json(serde_json::Value),
    /// A multipart form, sent as `multipart/form-data`.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Returns the `Content-Type` header value for this body.
    #[must_use]
    pub fn content_type(&self) -> String {
        match self {
            Self::Json(_) => JSON_CONTENT_TYPE.to_string(),
            Self::Multipart(form) => form.content_type(),
        }
    }

    /// Serializes the body to the bytes sent on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Multipart(form) => form.to_bytes(),
        }
    }
}

/// An HTTP request to be sent to the Admin API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use ghost_admin::AdminApiKey;
/// use ghost_admin::auth::sign_admin_token;
/// use ghost_admin::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let key = AdminApiKey::new(format!("key-id:{}", "ab".repeat(32))).unwrap();
/// let token = sign_admin_token(&key, 1_700_000_000);
///
/// let request = HttpRequest::builder(HttpMethod::Post, "posts/")
///     .query_param("source", "html")
///     .json_body(json!({"posts": [{"title": "Hello"}]}))
///     .admin_token(&token)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path_and_query(), "posts/?source=html");
/// assert_eq!(request.header("content-type"), Some("application/json"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the Admin API root (e.g. `posts/`).
    pub path: String,
    /// Query parameters, in the order they are sent.
    pub query: Vec<(String, String)>,
    /// Request headers, including `Authorization` and `Content-Type`.
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    /// - the `Authorization` header is missing
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.header(AUTHORIZATION_HEADER).is_none() {
            return Err(InvalidHttpRequestError::MissingAuthorization {
                path: self.path.clone(),
            });
        }

        Ok(())
    }

    /// Looks up a header value, ignoring ASCII case of the name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the path followed by the percent-encoded query string.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }

    /// Returns the JSON body, if this is a JSON request.
    #[must_use]
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the serialized body bytes, if any.
    #[must_use]
    pub fn body_bytes(&self) -> Option<Vec<u8>> {
        self.body.as_ref().map(RequestBody::to_bytes)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
///
/// The builder performs no I/O. `Content-Type` is derived from the body when
/// the request is built.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<RequestBody>,
}

impl HttpRequestBuilder {
    /// Creates a new builder with the required method and path.
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Authorizes the request with an admin token.
    #[must_use]
    pub fn admin_token(self, token: &AdminToken) -> Self {
        self.header(AUTHORIZATION_HEADER, token.authorization_value())
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(mut self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let content_type = self
            .body
            .as_ref()
            .map_or_else(|| JSON_CONTENT_TYPE.to_string(), RequestBody::content_type);
        self.headers
            .insert(CONTENT_TYPE_HEADER.to_string(), content_type);

        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}
