//! Configuration types for the Ghost Admin API client.
//!
//! This module provides the configuration used to construct an
//! [`AdminClient`](crate::admin::AdminClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GhostConfig`]: The configuration struct holding all client settings
//! - [`GhostConfigBuilder`]: A builder for constructing [`GhostConfig`] instances
//! - [`AdminApiKey`]: A parsed `id:secret` admin key with masked debug output
//! - [`SiteUrl`]: A validated site URL
//!
//! # Example
//!
//! ```rust
//! use ghost_admin::{AdminApiKey, GhostConfig, SiteUrl};
//!
//! let config = GhostConfig::builder()
//!     .site_url(SiteUrl::new("https://blog.example.com").unwrap())
//!     .admin_api_key(AdminApiKey::new(format!("key-id:{}", "ab".repeat(32))).unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AdminApiKey, SiteUrl, ADMIN_SECRET_LEN};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the site URL.
pub const GHOST_URL_ENV: &str = "GHOST_URL";

/// Environment variable holding the `id:secret` admin key.
pub const GHOST_ADMIN_API_KEY_ENV: &str = "GHOST_ADMIN_API_KEY";

/// Configuration for the Ghost Admin API client.
///
/// The configuration is immutable once built. The admin key inside it is the
/// only long-lived credential; tokens derived from it are never stored.
///
/// # Thread Safety
///
/// `GhostConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct GhostConfig {
    site_url: SiteUrl,
    admin_api_key: AdminApiKey,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl GhostConfig {
    /// Creates a new builder for constructing a `GhostConfig`.
    #[must_use]
    pub fn builder() -> GhostConfigBuilder {
        GhostConfigBuilder::new()
    }

    /// Builds a configuration from `GHOST_URL` and `GHOST_ADMIN_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if either variable is unset or
    /// empty, or the validation error of the offending value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let site_url = SiteUrl::new(require_env(GHOST_URL_ENV)?)?;
        let admin_api_key = AdminApiKey::new(require_env(GHOST_ADMIN_API_KEY_ENV)?)?;

        Self::builder()
            .site_url(site_url)
            .admin_api_key(admin_api_key)
            .build()
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// Returns the admin API key.
    #[must_use]
    pub const fn admin_api_key(&self) -> &AdminApiKey {
        &self.admin_api_key
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify GhostConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GhostConfig>();
};

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar { name }),
    }
}

/// Builder for constructing [`GhostConfig`] instances.
///
/// Required fields are `site_url` and `admin_api_key`.
///
/// # Defaults
///
/// - `timeout`: `None` (the transport's own default applies)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct GhostConfigBuilder {
    site_url: Option<SiteUrl>,
    admin_api_key: Option<AdminApiKey>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl GhostConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site URL (required).
    #[must_use]
    pub fn site_url(mut self, url: SiteUrl) -> Self {
        self.site_url = Some(url);
        self
    }

    /// Sets the admin API key (required).
    #[must_use]
    pub fn admin_api_key(mut self, key: AdminApiKey) -> Self {
        self.admin_api_key = Some(key);
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`GhostConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `site_url` or
    /// `admin_api_key` are not set.
    pub fn build(self) -> Result<GhostConfig, ConfigError> {
        let site_url = self
            .site_url
            .ok_or(ConfigError::MissingRequiredField { field: "site_url" })?;
        let admin_api_key = self
            .admin_api_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "admin_api_key",
            })?;

        Ok(GhostConfig {
            site_url,
            admin_api_key,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
