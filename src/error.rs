//! Error types for the Ghost Admin API client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. A malformed admin key or site URL is rejected when it
//! is parsed, never later while a request is being signed or sent.
//!
//! # Example
//!
//! ```rust
//! use ghost_admin::{AdminApiKey, ConfigError};
//!
//! let result = AdminApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAdminApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message. Secret material
/// is never included in a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Admin API key cannot be empty.
    #[error("Admin API key cannot be empty. Please provide a key in 'id:secret' format.")]
    EmptyAdminApiKey,

    /// Admin API key is not in `id:secret` format.
    #[error("Admin API key must be in 'id:secret' format: {reason}")]
    MalformedAdminApiKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// The secret half of the admin API key is not valid hex.
    #[error("Admin API key secret is not valid hex: {reason}")]
    InvalidSecretEncoding {
        /// The decoder's description of the problem.
        reason: String,
    },

    /// The decoded secret has the wrong length.
    #[error("Admin API key secret must decode to {expected} bytes, got {actual}.")]
    InvalidSecretLength {
        /// The required number of bytes.
        expected: usize,
        /// The number of bytes that were decoded.
        actual: usize,
    },

    /// Site URL is invalid.
    #[error("Invalid site URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://blog.example.com').")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Environment variable '{name}' is not set.")]
    MissingEnvVar {
        /// The name of the variable.
        name: &'static str,
    },
}
