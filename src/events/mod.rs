//! The daemon's event feed.
//!
//! - [`EventDecoder`] frames a concatenated-JSON byte stream into events
//! - [`EventStream`] runs the decoder on a background task and delivers
//!   events to a single consumer

mod decoder;
mod stream;

pub use decoder::{EventDecoder, DEFAULT_MAX_OBJECT_SIZE};
pub use stream::{EventStream, StreamState};
