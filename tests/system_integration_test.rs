//! Version, info and ping endpoint tests using wiremock.

mod common;

use common::client_for;
use dockwire::ClientError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_version_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .and(header("User-Agent", common::TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Version": "0.2.2",
            "GitCommit": "5a2a5cc+CHANGES",
            "GoVersion": "go1.0.3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let version = client_for(&server).version().await.unwrap();

    assert_eq!(version.version, "0.2.2");
    assert_eq!(version.git_commit, "5a2a5cc+CHANGES");
    assert_eq!(version.go_version, "go1.0.3");
}

#[tokio::test]
async fn test_info_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Containers": 11,
            "Images": 16,
            "Debug": false,
            "NFd": 11,
            "NGoroutines": 21,
            "MemoryLimit": true,
            "SwapLimit": false,
            "IPv4Forwarding": true
        })))
        .mount(&server)
        .await;

    let info = client_for(&server).info().await.unwrap();

    assert_eq!(info.containers, 11);
    assert_eq!(info.images, 16);
    assert_eq!(info.n_fd, 11);
    assert_eq!(info.n_goroutines, 21);
    assert!(info.memory_limit);
    assert!(!info.swap_limit);
    assert!(info.ipv4_forwarding);
}

#[tokio::test]
async fn test_info_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server).info().await.unwrap_err();

    let api = err.as_api().expect("expected an API error");
    assert_eq!(api.status, 500);
    assert_eq!(api.body, "Server Error");
    assert_eq!(err.to_string(), "API error (500): Server Error");
}

#[tokio::test]
async fn test_version_invalid_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).version().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }), "got {:?}", err);
    assert_eq!(err.error_code(), "E_CLIENT_DECODE");
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).ping().await.unwrap();
}
