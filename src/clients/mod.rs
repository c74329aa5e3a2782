//! HTTP layer for Admin API communication.
//!
//! This module provides the request core below the resource operations:
//! shaping requests, framing multipart bodies, and executing requests
//! against the Admin API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpRequest`]: A fully shaped request (method, path, query, headers, body)
//! - [`MultipartForm`]: A `multipart/form-data` body with ordered parts
//! - [`Transport`]: The seam that executes requests
//! - [`HttpClient`]: The reqwest-backed [`Transport`]
//! - [`HttpResponse`]: A decoded 2xx response
//! - [`HttpError`]: Rejections, network failures and decode failures
//!
//! # Retry Behavior
//!
//! There is none. Every failure is returned to the caller as-is, and the
//! operation that issued the request stops.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod multipart;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, Transport, SDK_VERSION};
pub use http_request::{
    HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, AUTHORIZATION_HEADER,
    CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE,
};
pub use http_response::{parse_error_detail, ApiErrorDetail, HttpResponse};
pub use multipart::{guess_mime_type, MultipartForm, FALLBACK_CONTENT_TYPE};
