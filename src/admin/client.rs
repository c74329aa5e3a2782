//! Admin API client for post and image operations.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::admin::errors::AdminError;
use crate::admin::images::{ImageUpload, ImagesEnvelope, UploadedImage};
use crate::admin::posts::{
    posts_envelope, ConcurrencyToken, NewPost, Post, PostListParams, PostStatus, PostUpdate,
    PostsEnvelope, LIST_ORDER,
};
use crate::auth::AdminToken;
use crate::clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, Transport,
};
use crate::config::{AdminApiKey, GhostConfig};

/// Query marker telling the service the content is HTML.
const SOURCE_HTML: (&str, &str) = ("source", "html");

/// Client for the Ghost Admin API.
///
/// Each operation issues one request (two for updates), each carrying a
/// freshly minted admin token. Requests are sent sequentially and nothing is
/// retried: the first failure ends the operation.
///
/// The client is generic over its [`Transport`] so it can be driven by a
/// stub in tests. [`AdminClient::new`] uses the reqwest-backed
/// [`HttpClient`].
///
/// # Example
///
/// ```rust,ignore
/// use ghost_admin::{AdminClient, GhostConfig, NewPost};
///
/// let client = AdminClient::new(&GhostConfig::from_env()?)?;
/// let post = client.create_post(&NewPost::new("Hello", "<p>World</p>")).await?;
/// let post = client.publish_post(&post.id).await?;
/// println!("{}", post.url.unwrap_or_default());
/// ```
#[derive(Debug)]
pub struct AdminClient<T = HttpClient> {
    key: AdminApiKey,
    transport: T,
}

impl AdminClient<HttpClient> {
    /// Creates a client for the configured site.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &GhostConfig) -> Result<Self, AdminError> {
        let transport = HttpClient::new(config)?;
        Ok(Self::with_transport(config.admin_api_key().clone(), transport))
    }

    /// Creates a client from `GHOST_URL` and `GHOST_ADMIN_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] if a variable is missing or invalid.
    pub fn from_env() -> Result<Self, AdminError> {
        Self::new(&GhostConfig::from_env()?)
    }
}

impl<T: Transport> AdminClient<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub const fn with_transport(key: AdminApiKey, transport: T) -> Self {
        Self { key, transport }
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a post.
    ///
    /// Sends `POST posts/?source=html` with the post in a `posts` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the request fails, or
    /// [`AdminError::UnexpectedResponse`] if the answer has no post.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, AdminError> {
        let request = HttpRequest::builder(HttpMethod::Post, "posts/")
            .query_param(SOURCE_HTML.0, SOURCE_HTML.1)
            .json_body(posts_envelope(post.to_payload()));

        let created = first_post(self.send(request).await?)?;
        tracing::info!(post_id = %created.id, status = %created.status, "Created post");
        Ok(created)
    }

    /// Fetches a post by id.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the request fails (a missing post is
    /// a 404 rejection), or [`AdminError::UnexpectedResponse`] if the answer
    /// has no post.
    pub async fn get_post(&self, id: &str) -> Result<Post, AdminError> {
        let request = HttpRequest::builder(HttpMethod::Get, post_path(id));
        first_post(self.send(request).await?)
    }

    /// Lists posts, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the request fails, or
    /// [`AdminError::UnexpectedResponse`] if the answer has no `posts`.
    pub async fn list_posts(&self, params: &PostListParams) -> Result<Vec<Post>, AdminError> {
        let request = HttpRequest::builder(HttpMethod::Get, "posts/")
            .query_param("status", params.status_filter())
            .query_param("limit", params.limit.to_string())
            .query_param("order", LIST_ORDER);

        let envelope: PostsEnvelope = decode(self.send(request).await?, "posts")?;
        Ok(envelope.posts)
    }

    /// Reads the current `updated_at` of a post.
    ///
    /// This is the first phase of an update; pass the token to
    /// [`submit_update`](Self::submit_update).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the read fails, or
    /// [`AdminError::UnexpectedResponse`] if the post has no `updated_at`.
    pub async fn fetch_concurrency_token(&self, id: &str) -> Result<ConcurrencyToken, AdminError> {
        let post = self.get_post(id).await?;
        let token = ConcurrencyToken::from_post(&post)
            .ok_or_else(|| AdminError::unexpected(format!("post {id} has no updated_at")))?;
        tracing::debug!(post_id = id, updated_at = token.as_str(), "Read concurrency token");
        Ok(token)
    }

    /// Writes `update` to a post, carrying `token` as `updated_at`.
    ///
    /// Sends `PUT posts/{id}/?source=html`. If the post changed since the
    /// token was read, the service rejects the write (see
    /// [`AdminError::is_update_collision`]).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the request fails, or
    /// [`AdminError::UnexpectedResponse`] if the answer has no post.
    pub async fn submit_update(
        &self,
        id: &str,
        update: &PostUpdate,
        token: &ConcurrencyToken,
    ) -> Result<Post, AdminError> {
        let request = HttpRequest::builder(HttpMethod::Put, post_path(id))
            .query_param(SOURCE_HTML.0, SOURCE_HTML.1)
            .json_body(posts_envelope(update.to_payload(token)));

        let updated = first_post(self.send(request).await?)?;
        tracing::info!(post_id = %updated.id, status = %updated.status, "Updated post");
        Ok(updated)
    }

    /// Updates a post: reads its `updated_at`, then writes `update`.
    ///
    /// An empty update still performs both requests.
    ///
    /// # Errors
    ///
    /// Returns the first error of either phase. If the read fails, no write
    /// is attempted.
    pub async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Post, AdminError> {
        let token = self.fetch_concurrency_token(id).await?;
        self.submit_update(id, update, &token).await
    }

    /// Publishes a post. Same as updating its status to `published`.
    ///
    /// # Errors
    ///
    /// See [`update_post`](Self::update_post).
    pub async fn publish_post(&self, id: &str) -> Result<Post, AdminError> {
        let update = PostUpdate::default().with_status(PostStatus::Published);
        self.update_post(id, &update).await
    }

    /// Uploads an image and returns the stored image.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the request fails, or
    /// [`AdminError::UnexpectedResponse`] if the answer has no image.
    pub async fn upload_image(&self, upload: &ImageUpload) -> Result<UploadedImage, AdminError> {
        let request = HttpRequest::builder(HttpMethod::Post, "images/upload/")
            .multipart(upload.to_form());

        let envelope: ImagesEnvelope = decode(self.send(request).await?, "images")?;
        let image = envelope
            .images
            .into_iter()
            .next()
            .ok_or_else(|| AdminError::unexpected("response contains no images"))?;
        tracing::info!(url = %image.url, "Uploaded image");
        Ok(image)
    }

    /// Uploads a local image file and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Io`] if the file cannot be read, otherwise see
    /// [`upload_image`](Self::upload_image).
    pub async fn upload_image_file(
        &self,
        path: impl AsRef<Path>,
        reference: Option<&str>,
    ) -> Result<String, AdminError> {
        let mut upload = ImageUpload::from_path(path).await?;
        if let Some(reference) = reference {
            upload = upload.with_reference(reference);
        }
        Ok(self.upload_image(&upload).await?.url)
    }

    async fn send(&self, request: HttpRequestBuilder) -> Result<HttpResponse, AdminError> {
        let token = AdminToken::issue(&self.key);
        let request = request
            .admin_token(&token)
            .build()
            .map_err(HttpError::from)?;
        Ok(self.transport.execute(&request).await?)
    }
}

fn post_path(id: &str) -> String {
    format!("posts/{}/", urlencoding::encode(id))
}

fn decode<D: DeserializeOwned>(response: HttpResponse, key: &str) -> Result<D, AdminError> {
    if response.body.get(key).is_none() {
        return Err(AdminError::unexpected(format!(
            "response has no '{key}' envelope"
        )));
    }
    serde_json::from_value(response.body)
        .map_err(|e| AdminError::unexpected(format!("malformed '{key}' envelope: {e}")))
}

fn first_post(response: HttpResponse) -> Result<Post, AdminError> {
    let envelope: PostsEnvelope = decode(response, "posts")?;
    envelope
        .posts
        .into_iter()
        .next()
        .ok_or_else(|| AdminError::unexpected("response contains no posts"))
}
