//! Image uploads.
//!
//! Images are sent as `multipart/form-data` with a `file` part and an
//! optional `ref` part. The service answers with
//! `{"images": [{"url": ..., "ref": ...}]}`.

use std::path::Path;

use serde::Deserialize;

use crate::admin::errors::AdminError;
use crate::clients::{guess_mime_type, MultipartForm};

/// Name of the multipart part carrying the file.
pub const FILE_PART: &str = "file";

/// Name of the optional multipart part carrying the caller's reference.
pub const REF_PART: &str = "ref";

/// An image ready to be uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
    reference: Option<String>,
}

impl ImageUpload {
    /// Creates an upload from in-memory bytes.
    ///
    /// The content type is guessed from the extension of `file_name`.
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_mime_type(Path::new(&file_name)).to_string();
        Self {
            file_name,
            content_type,
            data,
            reference: None,
        }
    }

    /// Reads an upload from a local file.
    ///
    /// Only the final path component is sent as the file name.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Io`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AdminError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|source| AdminError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self {
            content_type: guess_mime_type(path).to_string(),
            file_name,
            data,
            reference: None,
        })
    }

    /// Overrides the guessed content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Attaches a reference the service echoes back. Empty references are
    /// not sent.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into()).filter(|r: &String| !r.is_empty());
        self
    }

    /// Returns the file name sent with the upload.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the content type sent with the upload.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the file contents.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the reference, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Builds the multipart body: the `ref` part (if any) then the `file` part.
    #[must_use]
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        if let Some(reference) = &self.reference {
            form = form.text(REF_PART, reference);
        }
        form.file(
            FILE_PART,
            &self.file_name,
            &self.content_type,
            self.data.clone(),
        )
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .field("reference", &self.reference)
            .finish()
    }
}

/// An image stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    /// Public URL of the stored image.
    pub url: String,
    /// The reference sent with the upload, echoed back.
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesEnvelope {
    pub(crate) images: Vec<UploadedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_guesses_content_type_from_name() {
        let upload = ImageUpload::new("photo.JPG", vec![1, 2, 3]);
        assert_eq!(upload.content_type(), "image/jpeg");
        assert_eq!(upload.file_name(), "photo.JPG");
        assert_eq!(upload.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let upload = ImageUpload::new("blob.qqzz", vec![]);
        assert_eq!(upload.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_form_puts_ref_before_file() {
        let form = ImageUpload::new("a.png", vec![0])
            .with_reference("hero")
            .to_form();
        assert_eq!(form.part_names(), vec!["ref", "file"]);
    }

    #[test]
    fn test_empty_reference_is_not_sent() {
        let upload = ImageUpload::new("a.png", vec![0]).with_reference("");
        assert!(upload.reference().is_none());
        assert_eq!(upload.to_form().part_names(), vec!["file"]);
    }

    #[test]
    fn test_debug_omits_file_contents() {
        let upload = ImageUpload::new("a.png", vec![7; 64]);
        let debug = format!("{upload:?}");
        assert!(debug.contains("len: 64"));
        assert!(!debug.contains("7, 7"));
    }

    #[tokio::test]
    async fn test_from_path_reads_file_and_uses_basename() {
        let dir = std::env::temp_dir().join(format!("ghost-admin-img-{}", rand::random::<u64>()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("cover.webp");
        tokio::fs::write(&path, b"RIFF").await.unwrap();

        let upload = ImageUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name(), "cover.webp");
        assert_eq!(upload.content_type(), "image/webp");
        assert_eq!(upload.data(), b"RIFF");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_io_error() {
        let error = ImageUpload::from_path("/nonexistent/ghost-admin/missing.png")
            .await
            .unwrap_err();
        assert!(matches!(error, AdminError::Io { ref path, .. } if path.ends_with("missing.png")));
    }
}
