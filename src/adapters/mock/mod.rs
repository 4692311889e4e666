//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling unit testing without a running daemon.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and streams

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
