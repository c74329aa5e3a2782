//! Post resource types.
//!
//! This module provides the [`Post`] record returned by the Admin API and the
//! request-side types used to create, update and list posts.
//!
//! # Wire Format
//!
//! Post requests and responses are wrapped in a `{"posts": [...]}` envelope.
//! Tags are sent as `[{"name": ...}]` objects and an author is sent as
//! `[{"email": ...}]`.
//!
//! # Example
//!
//! ```rust
//! use ghost_admin::admin::{NewPost, PostStatus, PostUpdate};
//!
//! let draft = NewPost::new("Hello", "<p>World</p>")
//!     .author_email("editor@example.com")
//!     .tags(["news", "release"]);
//! assert_eq!(draft.status, PostStatus::Draft);
//!
//! let update = PostUpdate::default()
//!     .with_title("Hello again")
//!     .with_tags(["news"]);
//! assert!(update.title.is_some());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of posts returned by a list call when no limit is given.
pub const DEFAULT_LIST_LIMIT: u32 = 15;

/// Sort order sent with every list call (most recently updated first).
pub const LIST_ORDER: &str = "updated_at desc";

/// The publication status of a post.
///
/// Statuses this crate does not know are kept verbatim in [`PostStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    /// Not visible on the site.
    #[default]
    Draft,
    /// Live on the site.
    Published,
    /// Will be published at `published_at`.
    Scheduled,
    /// Sent as a newsletter only.
    Sent,
    /// Any other status reported by the service.
    Other(String),
}

impl PostStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
            Self::Sent => "sent",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "draft" => Self::Draft,
            "published" => Self::Published,
            "scheduled" => Self::Scheduled,
            "sent" => Self::Sent,
            _ => Self::Other(value),
        }
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for PostStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An author embedded in a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// The unique identifier of the author.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Email address (Admin API only).
    #[serde(default)]
    pub email: Option<String>,
    /// Fields not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tag embedded in a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// The unique identifier of the tag.
    #[serde(default)]
    pub id: Option<String>,
    /// Tag name.
    #[serde(default)]
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Fields not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A post as returned by the Admin API.
///
/// The client only ever holds transient copies. Fields the service returns
/// that are not modeled here are preserved in [`Post::extra`], so a post
/// serializes back to the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// The unique identifier of the post.
    pub id: String,
    /// Stable UUID of the post.
    #[serde(default)]
    pub uuid: Option<String>,
    /// Post title.
    #[serde(default)]
    pub title: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Rendered HTML content.
    #[serde(default)]
    pub html: Option<String>,
    /// Publication status.
    #[serde(default)]
    pub status: PostStatus,
    /// Public URL of the post.
    #[serde(default)]
    pub url: Option<String>,
    /// Authors, primary author first.
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Tags, primary tag first.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Feature image URL.
    #[serde(default)]
    pub feature_image: Option<String>,
    /// Hand-written excerpt.
    #[serde(default)]
    pub custom_excerpt: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp, exactly as the service formatted it.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
    /// Fields not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `updated_at` value of a post as last read.
///
/// Sent back unchanged with an update so the service can reject the write
/// if the post changed in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcurrencyToken(String);

impl ConcurrencyToken {
    /// Wraps an `updated_at` value.
    #[must_use]
    pub fn new(updated_at: impl Into<String>) -> Self {
        Self(updated_at.into())
    }

    /// Returns the token of `post`, if the post carries `updated_at`.
    #[must_use]
    pub fn from_post(post: &Post) -> Option<Self> {
        post.updated_at.clone().map(Self)
    }

    /// Returns the `updated_at` value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A post to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// HTML content, sent with the `source=html` marker.
    pub html: String,
    /// Initial status (default: draft).
    pub status: PostStatus,
    /// Email of the author to attribute the post to.
    pub author_email: Option<String>,
    /// Tag names, in order.
    pub tags: Option<Vec<String>>,
}

impl NewPost {
    /// Creates a draft with the given title and HTML content.
    #[must_use]
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            status: PostStatus::Draft,
            author_email: None,
            tags: None,
        }
    }

    /// Sets the initial status.
    #[must_use]
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Attributes the post to the author with this email.
    #[must_use]
    pub fn author_email(mut self, email: impl Into<String>) -> Self {
        self.author_email = Some(email.into());
        self
    }

    /// Sets the tag names, preserving order.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the post object placed inside the `posts` envelope.
    ///
    /// An empty author email or an empty tag list is left out.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut post = Map::new();
        post.insert("title".to_string(), Value::from(self.title.as_str()));
        post.insert("html".to_string(), Value::from(self.html.as_str()));
        post.insert("status".to_string(), Value::from(self.status.as_str()));

        if let Some(email) = self.author_email.as_deref().filter(|e| !e.is_empty()) {
            post.insert(
                "authors".to_string(),
                Value::Array(vec![serde_json::json!({ "email": email })]),
            );
        }

        if let Some(tags) = self.tags.as_deref().filter(|t| !t.is_empty()) {
            post.insert("tags".to_string(), tag_objects(tags));
        }

        Value::Object(post)
    }
}

/// A partial update of a post.
///
/// Only fields that are set are sent; everything else is left untouched on
/// the server. Arbitrary extra fields can be added with
/// [`with_field`](Self::with_field); `null` extras are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New HTML content.
    pub html: Option<String>,
    /// New status.
    pub status: Option<PostStatus>,
    /// New tag names, in order. Replaces the current tags.
    pub tags: Option<Vec<String>>,
    /// New slug.
    pub slug: Option<String>,
    /// New excerpt.
    pub custom_excerpt: Option<String>,
    /// New feature image URL.
    pub feature_image: Option<String>,
    /// New publication timestamp (used with `scheduled`).
    pub published_at: Option<String>,
    /// Any other fields to send.
    pub extra: Map<String, Value>,
}

impl PostUpdate {
    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the HTML content.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the tag names, preserving order.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets an arbitrary field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_fields().is_empty()
    }

    /// Builds the post object for the `posts` envelope, carrying `token` as
    /// `updated_at`.
    #[must_use]
    pub fn to_payload(&self, token: &ConcurrencyToken) -> Value {
        let mut fields = self.to_fields();
        fields.insert("updated_at".to_string(), Value::from(token.as_str()));
        Value::Object(fields)
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields: Map<String, Value> = self
            .extra
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        // Tag names given as a raw field still go out as `{name}` objects.
        if let Some(Value::Array(entries)) = fields.get_mut("tags") {
            for entry in entries.iter_mut() {
                if let Value::String(name) = entry {
                    *entry = serde_json::json!({ "name": name });
                }
            }
        }

        let strings = [
            ("title", &self.title),
            ("html", &self.html),
            ("slug", &self.slug),
            ("custom_excerpt", &self.custom_excerpt),
            ("feature_image", &self.feature_image),
            ("published_at", &self.published_at),
        ];
        for (name, value) in strings {
            if let Some(value) = value {
                fields.insert(name.to_string(), Value::from(value.as_str()));
            }
        }

        if let Some(status) = &self.status {
            fields.insert("status".to_string(), Value::from(status.as_str()));
        }
        if let Some(tags) = &self.tags {
            fields.insert("tags".to_string(), tag_objects(tags));
        }

        fields
    }
}

/// Parameters for listing posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListParams {
    /// Only return posts with this status; `None` lists all statuses.
    pub status: Option<PostStatus>,
    /// Maximum number of posts to return.
    pub limit: u32,
}

impl Default for PostListParams {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl PostListParams {
    /// Returns the value of the `status` query parameter.
    #[must_use]
    pub fn status_filter(&self) -> &str {
        self.status.as_ref().map_or("all", PostStatus::as_str)
    }
}

/// The `{"posts": [...]}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct PostsEnvelope {
    pub(crate) posts: Vec<Post>,
}

/// Wraps a post object in the `{"posts": [...]}` envelope.
#[must_use]
pub fn posts_envelope(post: Value) -> Value {
    serde_json::json!({ "posts": [post] })
}

fn tag_objects(tags: &[String]) -> Value {
    Value::Array(
        tags.iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect(),
    )
}
