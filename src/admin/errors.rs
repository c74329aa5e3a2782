//! Error type for resource operations.

use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError};
use crate::error::ConfigError;

/// Status Ghost answers with when an update carries a stale `updated_at`.
pub const UPDATE_COLLISION_STATUS: u16 = 409;

/// Error returned by [`AdminClient`](crate::admin::AdminClient) operations.
///
/// # Example
///
/// ```rust,ignore
/// use ghost_admin::AdminError;
///
/// match client.update_post(id, update).await {
///     Ok(post) => println!("Saved {}", post.id),
///     Err(e) if e.is_update_collision() => println!("Post changed, re-read and retry"),
///     Err(AdminError::Http(e)) => println!("Request failed: {e}"),
///     Err(e) => println!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AdminError {
    /// The request was rejected, could not be sent, or its answer could not
    /// be decoded.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A local file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A 2xx answer that does not have the expected envelope.
    #[error("Unexpected Admin API response: {reason}")]
    UnexpectedResponse {
        /// What was missing or malformed.
        reason: String,
    },
}

impl AdminError {
    /// Returns the rejection if the service answered with a non-2xx status.
    #[must_use]
    pub fn rejection(&self) -> Option<&HttpResponseError> {
        match self {
            Self::Http(HttpError::Response(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns the status code of a rejection.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.rejection().map(|e| e.code)
    }

    /// Returns `true` if an update was rejected because the post changed
    /// since its `updated_at` was read.
    #[must_use]
    pub fn is_update_collision(&self) -> bool {
        self.status_code() == Some(UPDATE_COLLISION_STATUS)
    }

    pub(crate) fn unexpected(reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            reason: reason.into(),
        }
    }
}
