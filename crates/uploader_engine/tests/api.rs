use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use uploader_engine::{
    encode_file, BucketApi, ClientSettings, FailureKind, ReqwestBucketApi, UploadRequest,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestBucketApi {
    let endpoint = format!("{}/files", server.uri()).parse().unwrap();
    ReqwestBucketApi::new(ClientSettings::new(endpoint)).unwrap()
}

fn request(filename: &str, file_content: &str) -> UploadRequest {
    UploadRequest {
        filename: filename.to_string(),
        file_content: file_content.to_string(),
    }
}

#[tokio::test]
async fn list_returns_files_in_endpoint_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "files": ["b.txt", "a.txt"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let files = api_for(&server).list_files().await.expect("list ok");
    assert_eq!(files, vec!["b.txt".to_string(), "a.txt".to_string()]);
}

#[tokio::test]
async fn list_without_files_key_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let files = api_for(&server).list_files().await.expect("list ok");
    assert!(files.is_empty());
}

#[tokio::test]
async fn list_with_null_files_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": null })))
        .mount(&server)
        .await;

    let files = api_for(&server).list_files().await.expect("list ok");
    assert!(files.is_empty());
}

#[tokio::test]
async fn list_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server).list_files().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            code: 503,
            reason: "Service Unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn list_rejects_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_files().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidBody);
}

#[tokio::test]
async fn upload_posts_json_body_and_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "filename": "hi.txt", "fileContent": "aGk=" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let message = api_for(&server)
        .upload(&request("hi.txt", "aGk="))
        .await
        .expect("upload ok");
    assert_eq!(message, "ok");
}

#[tokio::test]
async fn upload_without_message_uses_default_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let message = api_for(&server)
        .upload(&request("hi.txt", "aGk="))
        .await
        .expect("upload ok");
    assert_eq!(message, uploader_core::DEFAULT_UPLOAD_MESSAGE);
}

#[tokio::test]
async fn upload_with_non_string_message_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": 42 })))
        .mount(&server)
        .await;

    let message = api_for(&server)
        .upload(&request("hi.txt", "aGk="))
        .await
        .expect("upload ok");
    assert_eq!(message, "42");
}

#[tokio::test]
async fn upload_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .upload(&request("hi.txt", "aGk="))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            code: 500,
            reason: "Internal Server Error".to_string()
        }
    );
}

#[tokio::test]
async fn configured_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "files": [] })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::new(format!("{}/files", server.uri()).parse().unwrap())
    };
    let err = ReqwestBucketApi::new(settings)
        .unwrap()
        .list_files()
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn no_timeouts_by_default() {
    let settings = ClientSettings::new("http://bucket.example.com/files".parse().unwrap());
    assert_eq!(settings.connect_timeout, None);
    assert_eq!(settings.request_timeout, None);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/files", listener.local_addr().unwrap());
    drop(listener);

    let api = ReqwestBucketApi::new(ClientSettings::new(endpoint.parse().unwrap())).unwrap();
    let err = api.list_files().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn encode_file_reads_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hi.txt");
    std::fs::write(&file, b"hi").unwrap();

    let encoded = encode_file(&file).await.expect("encode ok");
    assert_eq!(encoded.content, "aGk=");
    assert_eq!(encoded.byte_len, 2);

    let err = encode_file(&dir.path().join("missing.txt")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::FileRead);
}
