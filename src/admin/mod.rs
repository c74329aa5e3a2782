//! Resource operations on the Ghost Admin API.
//!
//! This module provides [`AdminClient`], which turns post and image
//! operations into requests, and the resource types those operations take
//! and return.
//!
//! # Operations
//!
//! | Operation | Requests |
//! |-----------|----------|
//! | [`create_post`](AdminClient::create_post) | `POST posts/?source=html` |
//! | [`get_post`](AdminClient::get_post) | `GET posts/{id}/` |
//! | [`list_posts`](AdminClient::list_posts) | `GET posts/?status=..&limit=..&order=updated_at desc` |
//! | [`update_post`](AdminClient::update_post) | `GET posts/{id}/`, then `PUT posts/{id}/?source=html` |
//! | [`publish_post`](AdminClient::publish_post) | as `update_post` with `status: published` |
//! | [`upload_image`](AdminClient::upload_image) | `POST images/upload/` (multipart) |
//!
//! # Optimistic Concurrency
//!
//! Every update first reads the post's `updated_at` and sends it back
//! unchanged with the write. If someone else saved the post in between, the
//! service rejects the write and the error reports
//! [`is_update_collision`](AdminError::is_update_collision). The client never
//! retries.

mod client;
mod errors;
mod images;
mod posts;

pub use client::AdminClient;
pub use errors::{AdminError, UPDATE_COLLISION_STATUS};
pub use images::{ImageUpload, UploadedImage, FILE_PART, REF_PART};
pub use posts::{
    posts_envelope, Author, ConcurrencyToken, NewPost, Post, PostListParams, PostStatus,
    PostUpdate, Tag, DEFAULT_LIST_LIMIT, LIST_ORDER,
};
