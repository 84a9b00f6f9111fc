//! Tests for object storage upload/download and URL derivation.

use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::backend::{guess_content_type, BackendClient};
use crate::config::BackendConfig;
use crate::error::InventoryError;

fn client_with_mock(mock_uri: &str) -> BackendClient {
    BackendClient::new(&BackendConfig::new(mock_uri, "test_key"))
}

#[tokio::test]
async fn upload_photo_stores_under_timestamped_key() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/\d+_clamp\.jpg$"))
        .and(header("Content-Type", "image/jpeg"))
        .and(header("apikey", "test_key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let key = client
        .upload_photo("clamp.jpg", vec![0xFF, 0xD8, 0xFF], "image/jpeg")
        .await
        .unwrap();
    assert!(key.ends_with("_clamp.jpg"));
    let prefix = key.trim_end_matches("_clamp.jpg");
    assert!(prefix.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn upload_photo_failure_surfaces_body() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/.*$"))
        .respond_with(ResponseTemplate::new(413).set_body_string("payload too large"))
        .mount(&mock_server)
        .await;

    let err = client
        .upload_photo("clamp.jpg", vec![0u8; 16], "image/jpeg")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("payload too large"));
}

#[tokio::test]
async fn download_photo_returns_bytes() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path_regex(r"^/storage/v1/object/public/images/171_clamp\.jpg$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .mount(&mock_server)
        .await;

    let bytes = client.download_photo("171_clamp.jpg").await.unwrap();
    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn download_photo_missing_object_is_an_error() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path_regex(r"^/storage/v1/object/public/images/.*$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = client.download_photo("gone.jpg").await.unwrap_err();
    assert!(matches!(err, InventoryError::PhotoFetchFailed(_)));
}

#[test]
fn public_url_joins_base_bucket_and_key() {
    let client = client_with_mock("https://example.supabase.co");

    assert_eq!(
        client.public_url("171_clamp.jpg"),
        "https://example.supabase.co/storage/v1/object/public/images/171_clamp.jpg"
    );
}

#[test]
fn public_url_escapes_awkward_keys() {
    let client = client_with_mock("https://example.supabase.co");

    assert_eq!(
        client.public_url("171_shop vise.jpg"),
        "https://example.supabase.co/storage/v1/object/public/images/171_shop%20vise.jpg"
    );
}

#[test]
fn content_type_from_extension() {
    assert_eq!(guess_content_type("clamp.jpg"), "image/jpeg");
    assert_eq!(guess_content_type("clamp.JPEG"), "image/jpeg");
    assert_eq!(guess_content_type("diagram.png"), "image/png");
    assert_eq!(guess_content_type("anim.gif"), "image/gif");
    assert_eq!(guess_content_type("shot.webp"), "image/webp");
    assert_eq!(guess_content_type("noextension"), "application/octet-stream");
}
