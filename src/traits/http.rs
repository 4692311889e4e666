//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the two kinds of request the
//! daemon client issues: one-shot GETs whose body is read in full, and
//! streaming GETs whose body stays open for as long as the daemon keeps
//! writing to it.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A live response body, yielded chunk by chunk as it arrives.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport errors.
///
/// These never describe a non-2xx response from `get`; that is a successful
/// exchange and comes back as a [`Response`]. `Status` is only produced by
/// `get_stream`, which must read the body of a failed handshake itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HttpError {
    /// The daemon actively refused the connection (nothing listening).
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),
    /// Connection could not be established for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// The streaming handshake returned a non-2xx status.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    /// Reading the body failed mid-transfer.
    #[error("IO error: {0}")]
    Io(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

impl HttpError {
    /// Whether the daemon was unreachable at the configured address.
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, HttpError::ConnectionRefused(_))
    }
}

/// Trait for the HTTP operations the daemon client needs.
///
/// Implementations include the production reqwest-based client and a mock
/// client for tests.
///
/// # Example
///
/// ```ignore
/// use dockwire::traits::{HttpClient, Headers};
///
/// async fn daemon_up<C: HttpClient>(client: &C) -> bool {
///     client
///         .get("http://127.0.0.1:4243/_ping", &Headers::new())
///         .await
///         .map(|r| r.is_success())
///         .unwrap_or(false)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and read the whole body.
    ///
    /// Any status code is returned as a [`Response`]; only transport-level
    /// failures are errors.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a GET request and hand back the body as it streams in.
    ///
    /// The request must not carry a timeout. A non-2xx status is turned into
    /// [`HttpError::Status`] after reading the body in full, so a returned
    /// stream always belongs to a successful response.
    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<ByteStream, HttpError>;
}
