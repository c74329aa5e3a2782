//! `multipart/form-data` bodies for uploads.
//!
//! The Admin API accepts images as a multipart form with an optional `ref`
//! text field followed by a `file` field. This module serializes such forms
//! byte-for-byte so the request can be built (and inspected) without any I/O.
//!
//! # Framing
//!
//! ```text
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="ref"\r\n
//! \r\n
//! {ref}\r\n
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="file"; filename="{name}"\r\n
//! Content-Type: {mime}\r\n
//! \r\n
//! {bytes}\r\n
//! --{boundary}--\r\n
//! ```

use std::path::Path;

/// Content type used when the file extension is not recognized.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Prefix of every generated boundary.
const BOUNDARY_PREFIX: &str = "----ghost";

#[derive(Clone, Debug, PartialEq, Eq)]
struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// A `multipart/form-data` form whose parts are serialized in insertion order.
///
/// # Example
///
/// ```rust
/// use ghost_admin::clients::MultipartForm;
///
/// let form = MultipartForm::with_boundary("XyZ")
///     .text("ref", "hero")
///     .file("file", "cat.png", "image/png", vec![1, 2, 3]);
///
/// assert_eq!(form.content_type(), "multipart/form-data; boundary=XyZ");
/// assert_eq!(form.part_names(), vec!["ref", "file"]);
/// assert!(form.to_bytes().ends_with(b"--XyZ--\r\n"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartForm {
    /// Creates an empty form with a random boundary.
    ///
    /// The boundary carries 128 random bits, so two forms built in the same
    /// second still get distinct boundaries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(format!("{BOUNDARY_PREFIX}{:032x}", rand::random::<u128>()))
    }

    /// Creates an empty form with a fixed boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a plain text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: value.into().into_bytes(),
        });
        self
    }

    /// Appends a file field with its file name and content type.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data,
        });
        self
    }

    /// Returns the boundary token.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the field names in serialization order.
    #[must_use]
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns the top-level `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Serializes the form into the request body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for part in &self.parts {
            body.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());

            let mut disposition = format!(
                "Content-Disposition: form-data; name=\"{}\"",
                escape_quoted(&part.name)
            );
            if let Some(file_name) = &part.file_name {
                disposition.push_str(&format!("; filename=\"{}\"", escape_quoted(file_name)));
            }
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"\r\n");

            if let Some(content_type) = &part.content_type {
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }

            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        body
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Guesses a MIME type from a path's extension.
///
/// Unknown or missing extensions fall back to [`FALLBACK_CONTENT_TYPE`].
///
/// # Example
///
/// ```rust
/// use ghost_admin::clients::guess_mime_type;
/// use std::path::Path;
///
/// assert_eq!(guess_mime_type(Path::new("photos/Cat.JPG")), "image/jpeg");
/// assert_eq!(guess_mime_type(Path::new("notes")), "application/octet-stream");
/// ```
#[must_use]
pub fn guess_mime_type(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
