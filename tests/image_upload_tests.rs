//! Integration tests for image uploads.
//!
//! The mock server captures the raw multipart body, which is parsed back
//! into its parts with `multer` to check framing and byte-exact file content.

use std::convert::Infallible;

use ghost_admin::{AdminApiKey, AdminClient, AdminError, GhostConfig, ImageUpload, SiteUrl};
use serde_json::json;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const UPLOAD_PATH: &str = "/ghost/api/admin/images/upload/";
const IMAGE_URL: &str = "https://blog.example.com/content/images/2024/05/cover.png";

/// A parsed multipart part
#[derive(Debug)]
struct ParsedPart {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

fn request_content_type(request: &Request) -> String {
    request
        .headers
        .iter()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("content-type"))
        .map(|(_, values)| values.last().as_str().to_string())
        .expect("upload must carry a content type")
}

/// Parses a captured upload body using the boundary from its content type
async fn parse_multipart(request: &Request) -> Vec<ParsedPart> {
    let boundary = multer::parse_boundary(request_content_type(request)).unwrap();
    assert!(
        request.body.ends_with(format!("--{boundary}--\r\n").as_bytes()),
        "body must end with the closing delimiter"
    );

    let body = request.body.clone();
    let stream = futures_util::stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        parts.push(ParsedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    parts
}

fn create_client(server: &MockServer) -> AdminClient {
    let config = GhostConfig::builder()
        .site_url(SiteUrl::new(server.uri()).unwrap())
        .admin_api_key(AdminApiKey::new(format!("6489ea1c0a:{}", "0f".repeat(32))).unwrap())
        .build()
        .unwrap();
    AdminClient::new(&config).unwrap()
}

async fn mount_upload(server: &MockServer, reference: Option<&str>) {
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(header_regex("authorization", r"^Ghost \S+$"))
        .and(header_regex(
            "content-type",
            r"^multipart/form-data; boundary=\S+$",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "images": [{"url": IMAGE_URL, "ref": reference}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Bytes that would break naive text handling: CR/LF pairs and NULs
fn binary_payload() -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend((0u8..=255).cycle().take(2048));
    data.extend_from_slice(b"\r\n--not-a-boundary\r\n\0\0");
    data
}

#[tokio::test]
async fn test_upload_with_reference_sends_ref_then_file() {
    let server = MockServer::start().await;
    mount_upload(&server, Some("hero")).await;

    let data = binary_payload();
    let client = create_client(&server);
    let image = client
        .upload_image(&ImageUpload::new("cover.png", data.clone()).with_reference("hero"))
        .await
        .unwrap();

    assert_eq!(image.url, IMAGE_URL);
    assert_eq!(image.reference.as_deref(), Some("hero"));

    let requests = server.received_requests().await.unwrap();
    let parts = parse_multipart(&requests[0]).await;

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].name.as_deref(), Some("ref"));
    assert_eq!(parts[0].file_name, None);
    assert_eq!(parts[0].content_type, None);
    assert_eq!(parts[0].data, b"hero");
    assert_eq!(parts[1].name.as_deref(), Some("file"));
    assert_eq!(parts[1].file_name.as_deref(), Some("cover.png"));
    assert_eq!(parts[1].content_type.as_deref(), Some("image/png"));
    assert_eq!(parts[1].data, data);
}

#[tokio::test]
async fn test_upload_without_reference_sends_only_file() {
    let server = MockServer::start().await;
    mount_upload(&server, None).await;

    let client = create_client(&server);
    client
        .upload_image(&ImageUpload::new("logo.svg", b"<svg/>".to_vec()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let parts = parse_multipart(&requests[0]).await;

    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name.as_deref(), Some("file"));
    assert_eq!(parts[0].file_name.as_deref(), Some("logo.svg"));
    assert_eq!(parts[0].content_type.as_deref(), Some("image/svg+xml"));
    assert_eq!(parts[0].data, b"<svg/>");
}

#[tokio::test]
async fn test_upload_file_from_disk_returns_url() {
    let server = MockServer::start().await;
    mount_upload(&server, Some("r-1")).await;

    let dir = std::env::temp_dir().join(format!("ghost-admin-upload-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let file = dir.join("cover.png");
    let data = binary_payload();
    tokio::fs::write(&file, &data).await.unwrap();

    let client = create_client(&server);
    let url = client.upload_image_file(&file, Some("r-1")).await.unwrap();
    tokio::fs::remove_dir_all(&dir).await.unwrap();

    assert_eq!(url, IMAGE_URL);

    let requests = server.received_requests().await.unwrap();
    let parts = parse_multipart(&requests[0]).await;
    assert_eq!(parts[1].file_name.as_deref(), Some("cover.png"));
    assert_eq!(parts[1].data, data);
}

#[tokio::test]
async fn test_missing_file_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .upload_image_file("/nonexistent/ghost-admin/cover.png", None)
        .await
        .unwrap_err();

    assert!(matches!(error, AdminError::Io { .. }));
}

#[tokio::test]
async fn test_rejected_upload_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(415).set_body_json(json!({
            "errors": [{"message": "Please select a valid image.", "type": "UnsupportedMediaTypeError"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .upload_image(&ImageUpload::new("notes.txt", b"hello".to_vec()))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(415));
    assert_eq!(
        error.to_string(),
        "Admin API returned 415: Please select a valid image."
    );
}
