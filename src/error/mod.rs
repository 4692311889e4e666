//! Error handling for the daemon client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - [`ApiError`]: the daemon answered with a non-success status
//! - [`ClientError`]: anything returned synchronously by a client call
//! - [`StreamError`]: why an event stream ended abnormally
//!
//! | Category | Raised by | Retryable |
//! |----------|-----------|-----------|
//! | Network | refused connection, transport failure, truncated stream | Yes |
//! | Daemon | non-2xx response | 5xx only |
//! | Protocol | body or event that does not decode | No |
//! | Configuration | unusable endpoint | No |
//! | Cancelled | consumer closed the stream | No |

mod api;
mod category;
mod client;
mod stream;

pub use api::ApiError;
pub use category::ErrorCategory;
pub use client::ClientError;
pub use stream::StreamError;

/// Type alias for Results of client operations.
pub type ClientResult<T> = Result<T, ClientError>;
