//! Errors that end an event stream.
//!
//! These are never returned from a call. The decode task records at most one
//! of them as the stream's terminal state, and consumers read it back once
//! the stream has stopped yielding events.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Why an event stream stopped abnormally.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Reading the response body failed (connection reset, broken pipe).
    Transport(HttpError),

    /// The daemon sent bytes that are not a valid event object.
    InvalidJson {
        /// Offset of the failing object from the start of the stream
        offset: usize,
        message: String,
    },

    /// An object grew past the decoder's size limit without being closed.
    ObjectTooLarge {
        /// Offset of the oversized object from the start of the stream
        offset: usize,
        limit: usize,
    },

    /// The body ended in the middle of an object.
    Truncated {
        /// Bytes of the incomplete object left in the buffer
        pending_bytes: usize,
    },

    /// The stream was closed on the consumer side while still running.
    ConnectionClosed,
}

impl StreamError {
    /// High-level category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StreamError::Transport(_) | StreamError::Truncated { .. } => ErrorCategory::Network,
            StreamError::InvalidJson { .. } | StreamError::ObjectTooLarge { .. } => {
                ErrorCategory::Protocol
            }
            StreamError::ConnectionClosed => ErrorCategory::Cancelled,
        }
    }

    /// Whether opening a new subscription is likely to work.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Whether the stream ended because its own consumer closed it.
    pub fn is_closed_by_consumer(&self) -> bool {
        matches!(self, StreamError::ConnectionClosed)
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport(_) => "E_STREAM_TRANSPORT",
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::ObjectTooLarge { .. } => "E_STREAM_TOO_LARGE",
            StreamError::Truncated { .. } => "E_STREAM_TRUNCATED",
            StreamError::ConnectionClosed => "E_STREAM_CLOSED",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Transport(err) => {
                write!(f, "Event stream read failed: {}", err)
            }
            StreamError::InvalidJson { offset, message } => {
                write!(f, "Invalid event JSON at byte {}: {}", offset, message)
            }
            StreamError::ObjectTooLarge { offset, limit } => {
                write!(
                    f,
                    "Event at byte {} exceeds the {} byte limit",
                    offset, limit
                )
            }
            StreamError::Truncated { pending_bytes } => {
                write!(
                    f,
                    "Event stream ended inside an object ({} bytes pending)",
                    pending_bytes
                )
            }
            StreamError::ConnectionClosed => {
                write!(f, "Event stream connection closed")
            }
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        StreamError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_retryable() {
        let err = StreamError::from(HttpError::Io("connection reset".to_string()));
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_TRANSPORT");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_json_is_not_retryable() {
        let err = StreamError::InvalidJson {
            offset: 42,
            message: "expected value".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Protocol);
        assert_eq!(
            err.to_string(),
            "Invalid event JSON at byte 42: expected value"
        );
    }

    #[test]
    fn test_connection_closed() {
        let err = StreamError::ConnectionClosed;
        assert!(err.is_closed_by_consumer());
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_CLOSED");
    }

    #[test]
    fn test_object_too_large() {
        let err = StreamError::ObjectTooLarge {
            offset: 7,
            limit: 64,
        };
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_TOO_LARGE");
        assert_eq!(err.to_string(), "Event at byte 7 exceeds the 64 byte limit");
    }

    #[test]
    fn test_truncated_display() {
        let err = StreamError::Truncated { pending_bytes: 9 };
        assert!(err.to_string().contains("9 bytes pending"));
        assert_eq!(err.category(), ErrorCategory::Network);
    }
}
