//! Errors reported by the daemon itself.

use std::fmt;

/// A non-success response from the daemon.
///
/// The body is kept verbatim; the daemon usually sends a JSON payload of the
/// form `{"message": "..."}` but older versions reply with plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ApiError {
    /// Wrap a status code and raw body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The human-readable message: the `message` field of a JSON body when
    /// there is one, otherwise the trimmed body text.
    pub fn message(&self) -> String {
        #[derive(serde::Deserialize)]
        struct Payload {
            message: String,
        }

        match serde_json::from_str::<Payload>(&self.body) {
            Ok(payload) => payload.message,
            Err(_) => self.body.trim().to_string(),
        }
    }

    /// Whether the resource the request named does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Whether the daemon failed internally.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error ({}): {}", self.status, self.message())
    }
}

impl std::error::Error for ApiError {}
