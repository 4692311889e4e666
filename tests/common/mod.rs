//! Common test utilities for integration tests.
//!
//! This module provides client fixtures and helpers shared by the
//! integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{client_for, collect_events};
//!
//! let server = wiremock::MockServer::start().await;
//! let client = client_for(&server);
//! let (events, error) = collect_events(client.events().await?).await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use dockwire::{ClientConfig, DockerClient, Event, EventStream, StreamError};
use wiremock::MockServer;

/// User agent sent by test clients.
pub const TEST_USER_AGENT: &str = "dockwire-tests/1.0";

/// Creates a reqwest-backed client pointed at a wiremock server.
pub fn client_for(server: &MockServer) -> DockerClient {
    client_for_endpoint(&server.uri())
}

/// Creates a reqwest-backed client pointed at `endpoint`.
pub fn client_for_endpoint(endpoint: &str) -> DockerClient {
    let config = ClientConfig::new(endpoint).with_user_agent(TEST_USER_AGENT);
    DockerClient::new(config).expect("test endpoint should be valid")
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    listener.local_addr().expect("local addr").port()
}

/// Drains a stream, returning every event and the terminal error.
pub async fn collect_events(mut stream: EventStream) -> (Vec<Event>, Option<StreamError>) {
    let mut events = Vec::new();
    while let Some(event) = stream.recv().await {
        events.push(event);
    }
    (events, stream.error())
}

/// Concatenates events as the daemon writes them: one JSON object after
/// another with no separator.
pub fn concatenated(events: &[serde_json::Value]) -> String {
    events.iter().map(|event| event.to_string()).collect()
}
