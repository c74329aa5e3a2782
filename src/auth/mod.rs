//! Authentication for the Ghost Admin API.
//!
//! The Admin API accepts a short-lived JWT signed with the admin key's secret,
//! sent as `Authorization: Ghost {token}`.
//!
//! # Overview
//!
//! - [`sign_admin_token`]: Pure signing function of (key, issue time)
//! - [`AdminToken`]: A signed token, minted fresh for each request
//! - [`AdminTokenClaims`]: The decoded payload of a token
//!
//! # Example
//!
//! ```rust
//! use ghost_admin::AdminApiKey;
//! use ghost_admin::auth::AdminToken;
//!
//! let key = AdminApiKey::new(format!("key-id:{}", "ab".repeat(32))).unwrap();
//! let token = AdminToken::issue(&key);
//! assert!(token.authorization_value().starts_with("Ghost "));
//! ```

mod token;

pub use token::{
    sign_admin_token, AdminToken, AdminTokenClaims, ADMIN_AUDIENCE, AUTHORIZATION_SCHEME,
    TOKEN_LIFETIME_SECS,
};
