//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from `dockwire::adapters::mock`
//! and provides a builder for clients backed by them.

pub use dockwire::adapters::mock::{MockHttpClient, MockResponse};
pub use dockwire::traits::{HttpError, Response};

use bytes::Bytes;
use dockwire::{ClientConfig, DockerClient};
use std::sync::Arc;

/// Endpoint used by mock-backed clients.
pub const MOCK_ENDPOINT: &str = "http://mock-daemon:4243";

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a complete response for an API path.
    pub fn with_json_response(self, path: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_ENDPOINT, path),
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Configures the event feed to deliver `chunks` and end cleanly.
    pub fn with_event_chunks(self, chunks: &[&str]) -> Self {
        self.client.set_response(
            &format!("{}/events", MOCK_ENDPOINT),
            MockResponse::Stream(to_bytes(chunks)),
        );
        self
    }

    /// Configures the event feed to deliver `chunks` and then stay idle.
    pub fn with_idle_event_feed(self, chunks: &[&str]) -> Self {
        self.client.set_response(
            &format!("{}/events", MOCK_ENDPOINT),
            MockResponse::StreamPending(to_bytes(chunks)),
        );
        self
    }

    /// Configures every request to fail with `error`.
    pub fn with_transport_error(self, error: HttpError) -> Self {
        self.client.set_default_response(MockResponse::Error(error));
        self
    }

    /// Builds a client backed by the configured mock.
    pub fn build(self) -> (DockerClient, MockHttpClient) {
        let client = DockerClient::with_http_client(
            ClientConfig::new(MOCK_ENDPOINT),
            Arc::new(self.client.clone()),
        )
        .expect("mock endpoint should be valid");
        (client, self.client)
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn to_bytes(chunks: &[&str]) -> Vec<Bytes> {
    chunks
        .iter()
        .map(|chunk| Bytes::from(chunk.to_string()))
        .collect()
}
