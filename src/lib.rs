//! # Ghost Admin API Rust Client
//!
//! A Rust client for the Ghost Admin API, providing validated configuration,
//! admin token signing, and post and image operations for publishing tools.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`GhostConfig`] and [`GhostConfigBuilder`]
//! - Validated newtypes for the admin key and site URL
//! - Short-lived HS256 admin tokens via [`auth`]
//! - Request shaping and multipart framing via [`clients`]
//! - Post and image operations via [`AdminClient`]
//! - Optimistic-concurrency updates that never retry
//!
//! ## Quick Start
//!
//! ```rust
//! use ghost_admin::{AdminApiKey, GhostConfig, SiteUrl};
//!
//! // Create configuration using the builder pattern
//! let config = GhostConfig::builder()
//!     .site_url(SiteUrl::new("https://blog.example.com").unwrap())
//!     .admin_api_key(AdminApiKey::new(format!("6489ea1c:{}", "ab".repeat(32))).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.site_url().admin_api_root(),
//!     "https://blog.example.com/ghost/api/admin"
//! );
//! ```
//!
//! ## Publishing a Post
//!
//! ```rust,ignore
//! use ghost_admin::{AdminClient, GhostConfig, NewPost, PostUpdate};
//!
//! // Reads GHOST_URL and GHOST_ADMIN_API_KEY
//! let client = AdminClient::new(&GhostConfig::from_env()?)?;
//!
//! let draft = client
//!     .create_post(&NewPost::new("Release notes", "<p>What changed</p>").tags(["releases"]))
//!     .await?;
//!
//! // Reads updated_at, then writes it back with the change
//! let draft = client
//!     .update_post(&draft.id, &PostUpdate::default().with_title("Release notes 1.2"))
//!     .await?;
//!
//! let live = client.publish_post(&draft.id).await?;
//! println!("{}", live.url.unwrap_or_default());
//! ```
//!
//! ## Uploading an Image
//!
//! ```rust,ignore
//! use ghost_admin::AdminClient;
//!
//! let client = AdminClient::from_env()?;
//! let url = client.upload_image_file("cover.png", Some("hero")).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: The admin key and site URL are checked on construction
//! - **No retries**: Every failure ends the operation that hit it
//! - **Fresh credentials**: A new admin token is signed for every request
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod admin;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{AdminApiKey, GhostConfig, GhostConfigBuilder, SiteUrl};
pub use error::ConfigError;

// Re-export resource operation types
pub use admin::{
    AdminClient, AdminError, ConcurrencyToken, ImageUpload, NewPost, Post, PostListParams,
    PostStatus, PostUpdate, UploadedImage,
};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, Transport,
};
