//! Transport for Admin API requests.
//!
//! This module provides the [`Transport`] seam and the [`HttpClient`] type
//! that implements it over `reqwest`.

use std::collections::HashMap;
use std::future::Future;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{parse_error_detail, HttpResponse};
use crate::config::GhostConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Executes built requests against the Admin API.
///
/// A transport sends exactly one HTTP request per call. It never retries:
/// a non-2xx status, a network failure or an undecodable body is returned
/// to the caller as an [`HttpError`].
///
/// The admin client is generic over this trait so tests can substitute a
/// stub that records requests and replays canned responses.
pub trait Transport: Send + Sync {
    /// Sends `request` and decodes the JSON body of a 2xx response.
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// HTTP client for making requests to the Admin API.
///
/// The client handles:
/// - URL construction from the site URL (`{site}/ghost/api/admin/{path}`)
/// - Default headers including User-Agent and Accept
/// - Classifying responses into success, rejection and decode failures
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use ghost_admin::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
/// use ghost_admin::auth::AdminToken;
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "posts/")
///     .admin_token(&AdminToken::issue(config.admin_api_key()))
///     .build()?;
///
/// let response = client.execute(&request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Admin API root (e.g., `https://blog.example.com/ghost/api/admin`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured site.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &GhostConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Ghost Admin Rust v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.site_url().admin_api_root(),
            default_headers,
        })
    }

    /// Returns the Admin API root URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL a request is sent to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        format!("{}/{}", self.base_url, request.path_and_query())
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for HttpClient {
    /// Sends an HTTP request to the Admin API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx body is not valid JSON (`Decode`)
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(request);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in self.default_headers.iter().chain(&request.headers) {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body_bytes() {
            req_builder = req_builder.body(body);
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path_and_query(),
            "Sending Admin API request"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        if !(200..=299).contains(&code) {
            let detail = parse_error_detail(&body_text);
            tracing::warn!(
                code,
                method = %request.http_method,
                path = %request.path,
                "Admin API rejected request"
            );
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: detail.as_ref().and_then(|d| d.message.clone()),
                error_reference: detail.and_then(|d| d.id),
                body: body_text,
            }));
        }

        let body = serde_json::from_str(&body_text).map_err(|source| HttpError::Decode {
            code,
            body: body_text,
            source,
        })?;

        Ok(HttpResponse::new(code, res_headers, body))
    }
}
