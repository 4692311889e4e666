//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (one-shot GET, streaming GET)

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
