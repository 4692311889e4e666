//! Incremental decoder for concatenated-JSON event streams.
//!
//! The daemon writes event objects back to back with no separator and no
//! enclosing array. Objects are self-delimiting, so the decoder buffers raw
//! bytes and hands out one complete object at a time, leaving any partial
//! tail in the buffer until more bytes arrive.

use bytes::{Buf, BytesMut};

use crate::error::StreamError;
use crate::models::Event;

/// Largest single event object the decoder will buffer.
pub const DEFAULT_MAX_OBJECT_SIZE: usize = 8 * 1024 * 1024;

/// Stateful framer that turns byte chunks into [`Event`]s.
///
/// Object boundaries are found by a brace scanner that resumes where the
/// previous call stopped, so each byte is scanned once and parsed once no
/// matter how the stream is chunked.
///
/// # Example
///
/// ```ignore
/// use dockwire::events::EventDecoder;
///
/// let mut decoder = EventDecoder::new();
/// decoder.feed(br#"{"status":"start","id":"abc"}{"stat"#);
///
/// let event = decoder.next_event()?.unwrap();
/// assert_eq!(event.status, "start");
///
/// // The second object is incomplete
/// assert!(decoder.next_event()?.is_none());
/// ```
#[derive(Debug)]
pub struct EventDecoder {
    /// Undecoded bytes; a partial object, when present, starts at index 0
    buffer: BytesMut,
    /// Bytes already consumed from the start of the stream
    consumed: usize,
    /// Bytes of the current object already scanned, 0 when between objects
    scanned: usize,
    depth: usize,
    in_string: bool,
    escaped: bool,
    max_object_size: usize,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::with_max_object_size(DEFAULT_MAX_OBJECT_SIZE)
    }
}

impl EventDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty decoder that rejects objects larger than `limit` bytes.
    pub fn with_max_object_size(limit: usize) -> Self {
        Self {
            buffer: BytesMut::new(),
            consumed: 0,
            scanned: 0,
            depth: 0,
            in_string: false,
            escaped: false,
            max_object_size: limit,
        }
    }

    /// Append a chunk read from the stream.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Decode the next complete object from the buffer.
    ///
    /// Returns `Ok(None)` when the buffer holds no complete object yet.
    /// Malformed input is an error; the decoder should not be used again
    /// after one.
    pub fn next_event(&mut self) -> Result<Option<Event>, StreamError> {
        if self.scanned == 0 {
            let whitespace = leading_whitespace(&self.buffer);
            self.advance(whitespace);

            match self.buffer.first() {
                None => return Ok(None),
                Some(b'{') => {}
                Some(&other) => {
                    return Err(StreamError::InvalidJson {
                        offset: self.consumed,
                        message: format!(
                            "expected '{{' at start of event, found '{}'",
                            other.escape_ascii()
                        ),
                    })
                }
            }
        }

        let Some(end) = self.scan() else {
            if self.buffer.len() > self.max_object_size {
                return Err(StreamError::ObjectTooLarge {
                    offset: self.consumed,
                    limit: self.max_object_size,
                });
            }
            return Ok(None);
        };

        let event = serde_json::from_slice::<Event>(&self.buffer[..end]).map_err(|err| {
            StreamError::InvalidJson {
                offset: self.consumed,
                message: err.to_string(),
            }
        })?;
        self.advance(end);
        Ok(Some(event))
    }

    /// Check the buffer at end of stream.
    ///
    /// A clean end leaves nothing but whitespace behind; anything else is
    /// the start of an object the daemon never finished.
    pub fn finish(&self) -> Result<(), StreamError> {
        let pending = self.buffer.len() - leading_whitespace(&self.buffer);
        if pending == 0 {
            Ok(())
        } else {
            Err(StreamError::Truncated {
                pending_bytes: pending,
            })
        }
    }

    /// Number of buffered bytes not yet decoded.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Total bytes decoded so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Continue scanning the object at the front of the buffer. Returns its
    /// length once the closing brace has been seen.
    fn scan(&mut self) -> Option<usize> {
        for (i, &byte) in self.buffer.iter().enumerate().skip(self.scanned) {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }

            match byte {
                b'"' => self.in_string = true,
                b'{' | b'[' => self.depth += 1,
                b'}' | b']' => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        }
        self.scanned = self.buffer.len();
        None
    }

    /// Drop `used` bytes from the front and reset the scanner.
    fn advance(&mut self, used: usize) {
        self.buffer.advance(used);
        self.consumed += used;
        self.scanned = 0;
        self.depth = 0;
        self.in_string = false;
        self.escaped = false;
    }
}

fn leading_whitespace(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_whitespace()).count()
}
