//! Admin token signing.
//!
//! Ghost authenticates Admin API calls with a short-lived HS256 JWT derived
//! from the admin key. This module mints those tokens.
//!
//! # Token Structure
//!
//! - header: `{"alg":"HS256","typ":"JWT","kid":<key id>}`
//! - payload: `{"iat":<now>,"exp":<now + 300>,"aud":"/admin/"}`
//! - signature: HMAC-SHA256 over `"{header}.{payload}"` keyed by the raw secret
//!
//! Every segment is base64url-encoded without padding.
//!
//! # Freshness
//!
//! Tokens are never cached. The admin client mints one immediately before
//! building each request, so no token outlives the request it authorizes.
//!
//! # Example
//!
//! ```rust
//! use ghost_admin::AdminApiKey;
//! use ghost_admin::auth::{sign_admin_token, TOKEN_LIFETIME_SECS};
//!
//! let key = AdminApiKey::new(format!("key-id:{}", "ab".repeat(32))).unwrap();
//! let token = sign_admin_token(&key, 1_700_000_000);
//!
//! let claims = token.claims().unwrap();
//! assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
//! assert_eq!(token, sign_admin_token(&key, 1_700_000_000));
//! ```

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::AdminApiKey;

type HmacSha256 = Hmac<Sha256>;

/// Validity window of an admin token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 300;

/// Audience claim expected by the Admin API.
pub const ADMIN_AUDIENCE: &str = "/admin/";

/// Scheme used in the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "Ghost";

#[derive(Serialize)]
struct TokenHeader<'a> {
    alg: &'static str,
    typ: &'static str,
    kid: &'a str,
}

/// Claims carried in the payload segment of an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminTokenClaims {
    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,
    /// Expiration timestamp (Unix seconds), always `iat + 300`.
    pub exp: i64,
    /// Audience, always `/admin/`.
    pub aud: String,
}

/// A signed admin token in compact `header.payload.signature` form.
///
/// The `Debug` implementation masks the token so it does not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    /// Mints a token for `key` issued at the current UTC time.
    #[must_use]
    pub fn issue(key: &AdminApiKey) -> Self {
        sign_admin_token(key, chrono::Utc::now().timestamp())
    }

    /// Returns the compact token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value for the `Authorization` header (`Ghost {token}`).
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("{AUTHORIZATION_SCHEME} {}", self.0)
    }

    /// Decodes the payload segment without verifying the signature.
    ///
    /// Returns `None` if the token is not in compact form or the payload
    /// is not the expected JSON.
    #[must_use]
    pub fn claims(&self) -> Option<AdminTokenClaims> {
        let payload = self.0.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(*****)")
    }
}

impl fmt::Display for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signs an admin token for `key`, issued at `issued_at` (Unix seconds).
///
/// This is a pure function: identical inputs always produce an identical
/// token. It cannot fail because the key was validated when it was parsed.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn sign_admin_token(key: &AdminApiKey, issued_at: i64) -> AdminToken {
    let header = TokenHeader {
        alg: "HS256",
        typ: "JWT",
        kid: key.id(),
    };
    let claims = AdminTokenClaims {
        iat: issued_at,
        exp: issued_at + TOKEN_LIFETIME_SECS,
        aud: ADMIN_AUDIENCE.to_string(),
    };

    let header = encode_segment(&header);
    let payload = encode_segment(&claims);
    let signing_input = format!("{header}.{payload}");

    let mut mac = HmacSha256::new_from_slice(key.secret()).expect("HMAC can take key of any size");
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    AdminToken(format!("{signing_input}.{signature}"))
}

#[allow(clippy::missing_panics_doc)]
fn encode_segment<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_vec(value).expect("token segments serialize to JSON");
    URL_SAFE_NO_PAD.encode(json)
}
