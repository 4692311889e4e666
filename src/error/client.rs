//! Errors returned synchronously by client operations.

use thiserror::Error;

use super::api::ApiError;
use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Failure of a request issued by [`DockerClient`](crate::client::DockerClient).
///
/// Everything that goes wrong before an event stream is handed to the
/// caller ends up here. Failures after that point are reported through
/// [`StreamError`](super::StreamError).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Nothing is listening at the configured address.
    #[error("cannot connect to the daemon at {endpoint}: connection refused")]
    ConnectionRefused { endpoint: String },

    /// The daemon answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(HttpError),

    /// A response body did not match the expected schema.
    #[error("failed to decode {path} response: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint cannot be used.
    #[error("invalid daemon endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl ClientError {
    /// Classify a transport error raised while talking to `endpoint`.
    ///
    /// Refused connections and failed streaming handshakes get their own
    /// variants so callers can tell "daemon down" from "daemon misbehaving".
    pub fn from_http(err: HttpError, endpoint: &str) -> Self {
        match err {
            HttpError::ConnectionRefused(_) => ClientError::ConnectionRefused {
                endpoint: endpoint.to_string(),
            },
            HttpError::Status { status, body } => ClientError::Api(ApiError::new(status, body)),
            other => ClientError::Transport(other),
        }
    }

    /// High-level category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::ConnectionRefused { .. } | ClientError::Transport(_) => {
                ErrorCategory::Network
            }
            ClientError::Api(_) => ErrorCategory::Daemon,
            ClientError::Decode { .. } => ErrorCategory::Protocol,
            ClientError::InvalidEndpoint { .. } => ErrorCategory::Configuration,
        }
    }

    /// Whether a fresh attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Api(api) => api.is_server_error(),
            ClientError::Transport(HttpError::InvalidUrl(_)) => false,
            other => other.category().is_retryable(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::ConnectionRefused { .. } => "E_CLIENT_REFUSED",
            ClientError::Api(_) => "E_CLIENT_API",
            ClientError::Transport(_) => "E_CLIENT_TRANSPORT",
            ClientError::Decode { .. } => "E_CLIENT_DECODE",
            ClientError::InvalidEndpoint { .. } => "E_CLIENT_ENDPOINT",
        }
    }

    /// The daemon's error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(api) => Some(api),
            _ => None,
        }
    }
}
