//! Daemon API client.
//!
//! [`DockerClient`] issues typed requests against the daemon's HTTP API and
//! opens the live event feed.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, ClientResult};
use crate::events::EventStream;
use crate::models::{Info, Version};
use crate::traits::{Headers, HttpClient, Response};

/// Path of the event feed.
pub const EVENTS_PATH: &str = "/events";

/// Client for the daemon's HTTP API.
///
/// Cloning is cheap; clones share the underlying HTTP client.
#[derive(Clone)]
pub struct DockerClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
}

impl DockerClient {
    /// Create a client for `config` backed by reqwest.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a client from the environment (`DOCKER_HOST`).
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client with a custom HTTP implementation.
    pub fn with_http_client(config: ClientConfig, http: Arc<dyn HttpClient>) -> ClientResult<Self> {
        config.validate()?;
        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Subscribe to the daemon's event feed.
    ///
    /// The connection stays open until the daemon ends it, it fails, or the
    /// returned stream is closed. Failures before the stream exists are
    /// returned here; later ones are reported by [`EventStream::error`].
    pub async fn events(&self) -> ClientResult<EventStream> {
        let url = self.config.url(EVENTS_PATH);
        debug!(%url, "Opening event stream");

        let body = self
            .http
            .get_stream(&url, &self.headers())
            .await
            .map_err(|e| ClientError::from_http(e, &self.config.endpoint))?;

        info!(endpoint = %self.config.endpoint, "Event stream opened");
        Ok(EventStream::spawn(body))
    }

    /// Fetch version information about the daemon.
    pub async fn version(&self) -> ClientResult<Version> {
        self.get_json("/version").await
    }

    /// Fetch system-wide information, like the number of running containers.
    pub async fn info(&self) -> ClientResult<Info> {
        self.get_json("/info").await
    }

    /// Check that the daemon is up and answering.
    pub async fn ping(&self) -> ClientResult<()> {
        self.get("/_ping").await.map(|_| ())
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.get(path).await?;
        response.json().map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// GET `path`, turning a non-2xx response into an [`ApiError`].
    async fn get(&self, path: &str) -> ClientResult<Response> {
        let url = self.config.url(path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url, &self.headers())
            .await
            .map_err(|e| ClientError::from_http(e, &self.config.endpoint))?;

        if !response.is_success() {
            return Err(ApiError::new(response.status, response.text()).into());
        }
        Ok(response)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("User-Agent".to_string(), self.config.user_agent.clone());
        headers
    }
}

impl std::fmt::Debug for DockerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::StreamError;
    use crate::traits::HttpError;
    use bytes::Bytes;
    use std::time::Duration;

    const ENDPOINT: &str = "http://daemon:4243";

    fn client(mock: &MockHttpClient) -> DockerClient {
        DockerClient::with_http_client(ClientConfig::new(ENDPOINT), Arc::new(mock.clone()))
            .unwrap()
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mock = MockHttpClient::new();
        let result =
            DockerClient::with_http_client(ClientConfig::new("ftp://daemon"), Arc::new(mock));
        assert!(matches!(result, Err(ClientError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_events_request_shape() {
        let mock = MockHttpClient::new();
        mock.set_response("http://daemon:4243/events", MockResponse::Stream(vec![]));

        let mut stream = client(&mock).events().await.unwrap();
        assert!(stream.recv().await.is_none());

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "http://daemon:4243/events");
        assert!(requests[0]
            .headers
            .get("User-Agent")
            .unwrap()
            .starts_with("dockwire/"));
    }

    #[tokio::test]
    async fn test_events_delivers_in_order() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/events",
            MockResponse::Stream(vec![
                Bytes::from(r#"{"status":"start","id":"abc","time":1000}"#),
                Bytes::from(r#"{"status":"die","id":"abc","time":1001}"#),
            ]),
        );

        let mut stream = client(&mock).events().await.unwrap();
        let first = stream.recv().await.unwrap();
        let second = stream.recv().await.unwrap();
        assert!(stream.recv().await.is_none());

        assert_eq!((first.status.as_str(), first.time), ("start", 1000));
        assert_eq!((second.status.as_str(), second.time), ("die", 1001));
        assert!(stream.error().is_none());
    }

    #[tokio::test]
    async fn test_events_non_success_status() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/events",
            MockResponse::Success(Response::new(
                500,
                Bytes::from(r#"{"message":"no such daemon"}"#),
            )),
        );

        let err = client(&mock).events().await.unwrap_err();
        let api = err.as_api().expect("expected an API error");
        assert_eq!(api.status, 500);
        assert_eq!(api.body, r#"{"message":"no such daemon"}"#);
        assert!(err.to_string().contains("no such daemon"));
    }

    #[tokio::test]
    async fn test_events_connection_refused() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionRefused(
            "tcp connect error".to_string(),
        )));

        let err = client(&mock).events().await.unwrap_err();
        match err {
            ClientError::ConnectionRefused { endpoint } => assert_eq!(endpoint, ENDPOINT),
            other => panic!("Expected ConnectionRefused, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_events_read_failure_is_terminal_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/events",
            MockResponse::StreamError(
                vec![Bytes::from(r#"{"status":"start"}"#)],
                HttpError::Io("connection reset by peer".to_string()),
            ),
        );

        let mut stream = client(&mock).events().await.unwrap();
        assert_eq!(stream.recv().await.unwrap().status, "start");
        assert!(stream.recv().await.is_none());
        assert!(matches!(stream.error(), Some(StreamError::Transport(_))));
    }

    #[tokio::test]
    async fn test_events_close_on_idle_connection() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/events",
            MockResponse::StreamPending(vec![]),
        );

        let mut stream = client(&mock).events().await.unwrap();
        stream.close();
        let error = tokio::time::timeout(Duration::from_secs(5), stream.closed())
            .await
            .unwrap();
        assert_eq!(error, Some(StreamError::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_version() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/version",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"Version":"0.7.1","GitCommit":"88df052","GoVersion":"go1.2"}"#),
            )),
        );

        let version = client(&mock).version().await.unwrap();
        assert_eq!(version.version, "0.7.1");
        assert_eq!(version.go_version, "go1.2");
    }

    #[tokio::test]
    async fn test_info() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/info",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"Containers":11,"Images":16,"Debug":true}"#),
            )),
        );

        let info = client(&mock).info().await.unwrap();
        assert_eq!(info.containers, 11);
        assert_eq!(info.images, 16);
        assert!(info.debug);
    }

    #[tokio::test]
    async fn test_info_api_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/info",
            MockResponse::Success(Response::new(500, Bytes::from("internal error"))),
        );

        let err = client(&mock).info().await.unwrap_err();
        assert_eq!(err.as_api(), Some(&ApiError::new(500, "internal error")));
    }

    #[tokio::test]
    async fn test_version_decode_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/version",
            MockResponse::Success(Response::new(200, Bytes::from("not json"))),
        );

        let err = client(&mock).version().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { ref path, .. } if path == "/version"));
    }

    #[tokio::test]
    async fn test_ping() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://daemon:4243/_ping",
            MockResponse::Success(Response::new(200, Bytes::from("OK"))),
        );
        assert!(client(&mock).ping().await.is_ok());
    }
}
