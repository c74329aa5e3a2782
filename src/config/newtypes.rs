//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the two values the client
//! needs: the admin API key and the site URL. Both validate their contents on
//! construction, so invalid values are rejected with clear error messages
//! before any request is built.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Number of raw bytes in a decoded admin key secret.
pub const ADMIN_SECRET_LEN: usize = 32;

/// A validated Ghost Admin API key.
///
/// Ghost issues admin keys as a single `id:secret` string where the secret is
/// hex-encoded. The key is parsed once; the secret is held as raw bytes and is
/// used to sign every admin token.
///
/// # Security
///
/// The `Debug` implementation masks the secret, displaying only the key id.
///
/// # Example
///
/// ```rust
/// use ghost_admin::AdminApiKey;
///
/// let secret = "00".repeat(32);
/// let key = AdminApiKey::new(format!("6489f2b1c0ffee:{secret}")).unwrap();
/// assert_eq!(key.id(), "6489f2b1c0ffee");
/// assert_eq!(format!("{:?}", key), r#"AdminApiKey { id: "6489f2b1c0ffee", secret: ***** }"#);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AdminApiKey {
    id: String,
    secret: [u8; ADMIN_SECRET_LEN],
}

impl AdminApiKey {
    /// Parses an admin key from its `id:secret` form.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyAdminApiKey`] if the input is empty
    /// - [`ConfigError::MalformedAdminApiKey`] if there is not exactly one `:`
    ///   or either half is empty
    /// - [`ConfigError::InvalidSecretEncoding`] if the secret is not hex
    /// - [`ConfigError::InvalidSecretLength`] if the secret is not 32 bytes
    pub fn new(key: impl AsRef<str>) -> Result<Self, ConfigError> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyAdminApiKey);
        }

        let mut parts = key.split(':');
        let (Some(id), Some(secret), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConfigError::MalformedAdminApiKey {
                reason: "expected exactly one ':' separator".to_string(),
            });
        };

        if id.is_empty() {
            return Err(ConfigError::MalformedAdminApiKey {
                reason: "key id is empty".to_string(),
            });
        }
        if secret.is_empty() {
            return Err(ConfigError::MalformedAdminApiKey {
                reason: "key secret is empty".to_string(),
            });
        }

        let decoded = hex::decode(secret).map_err(|e| ConfigError::InvalidSecretEncoding {
            reason: e.to_string(),
        })?;
        let actual = decoded.len();
        let secret: [u8; ADMIN_SECRET_LEN] =
            decoded
                .try_into()
                .map_err(|_| ConfigError::InvalidSecretLength {
                    expected: ADMIN_SECRET_LEN,
                    actual,
                })?;

        Ok(Self {
            id: id.to_string(),
            secret,
        })
    }

    /// Returns the key identifier, sent as the token's `kid` header.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the raw secret bytes used as the HMAC key.
    #[must_use]
    pub const fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl FromStr for AdminApiKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for AdminApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdminApiKey {{ id: {:?}, secret: ***** }}", self.id)
    }
}

/// A validated Ghost site URL.
///
/// The URL must be absolute with an `http` or `https` scheme and a host.
/// Surrounding whitespace and trailing slashes are removed so paths can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use ghost_admin::SiteUrl;
///
/// let url = SiteUrl::new("https://blog.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://blog.example.com");
/// assert_eq!(url.admin_api_root(), "https://blog.example.com/ghost/api/admin");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl SiteUrl {
    /// Path of the Admin API relative to the site root.
    pub const ADMIN_API_PATH: &'static str = "/ghost/api/admin";

    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if the URL has no `http`/`https`
    /// scheme, no host, or carries a query or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let url = raw.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidSiteUrl { url: raw.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid());
        }

        if url.contains(&['?', '#'][..]) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find(&[':', '/'][..])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the root URL of the Admin API (`{site}/ghost/api/admin`).
    #[must_use]
    pub fn admin_api_root(&self) -> String {
        format!("{}{}", self.url, Self::ADMIN_API_PATH)
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl FromStr for SiteUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
