//! Live event subscription.
//!
//! An [`EventStream`] owns a background task that reads the response body,
//! decodes one event at a time and hands each one to the consumer. The
//! hand-off channel has a single slot and the task only starts decoding the
//! next event once that slot is free again, so a slow consumer stalls the
//! network read instead of growing a buffer.
//!
//! When the task stops it records why in a write-once terminal slot, then
//! drops its end of the channel. Consumers drain [`EventStream::recv`] until
//! it returns `None` and only then read [`EventStream::error`].

use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};

use futures::Stream;
use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace, warn};

use super::decoder::EventDecoder;
use crate::error::StreamError;
use crate::models::Event;
use crate::traits::ByteStream;

/// Terminal outcome shared between the decode task and the handle.
/// `Some(None)` is a clean end of stream.
type TerminalSlot = Arc<OnceLock<Option<StreamError>>>;

/// Lifecycle of an event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// The decode task is reading from the daemon.
    Running,
    /// The decode task has stopped and released the connection. Events it
    /// delivered before stopping may still be waiting in [`EventStream::recv`].
    Closed,
}

/// A live subscription to the daemon's event feed.
///
/// Dropping the handle closes the stream.
///
/// # Example
///
/// ```ignore
/// let mut stream = client.events().await?;
/// while let Some(event) = stream.recv().await {
///     println!("{} {}", event.status, event.id);
/// }
/// match stream.error() {
///     None => println!("daemon closed the feed"),
///     Some(err) => eprintln!("feed broke: {}", err),
/// }
/// ```
#[derive(Debug)]
pub struct EventStream {
    events: mpsc::Receiver<Event>,
    close_tx: watch::Sender<bool>,
    terminal: TerminalSlot,
}

impl EventStream {
    /// Start decoding `body` on a background task.
    ///
    /// Must be called from within a tokio runtime. The task is detached; it
    /// ends on its own when the body ends or fails, or when the stream is
    /// closed.
    pub fn spawn(body: ByteStream) -> Self {
        let (events_tx, events) = mpsc::channel(1);
        let (close_tx, close_rx) = watch::channel(false);
        let terminal: TerminalSlot = Arc::new(OnceLock::new());

        let decode = DecodeLoop {
            body,
            decoder: EventDecoder::new(),
            closed: close_rx,
        };
        tokio::spawn(decode.run(events_tx, terminal.clone()));

        Self {
            events,
            close_tx,
            terminal,
        }
    }

    /// Receive the next event, or `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Why the stream ended.
    ///
    /// Only meaningful after [`recv`](Self::recv) has returned `None`: `None`
    /// then means the daemon ended the feed cleanly. While the stream is
    /// still running this also returns `None`.
    pub fn error(&self) -> Option<StreamError> {
        self.terminal.get().cloned().flatten()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        if self.terminal.get().is_some() {
            StreamState::Closed
        } else {
            StreamState::Running
        }
    }

    /// Sever the connection.
    ///
    /// Unblocks a pending read in the decode task, which then ends with
    /// [`StreamError::ConnectionClosed`]. Calling this again, or after the
    /// stream has already ended, does nothing.
    pub fn close(&self) {
        let already_closed = self.close_tx.send_replace(true);
        if !already_closed && self.terminal.get().is_none() {
            debug!("Closing event stream");
        }
    }

    /// Discard any undelivered events and wait for the stream to end.
    ///
    /// Returns the terminal error, as [`error`](Self::error) would after
    /// draining.
    pub async fn closed(&mut self) -> Option<StreamError> {
        while self.events.recv().await.is_some() {}
        self.error()
    }
}

impl Stream for EventStream {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.close();
    }
}

/// State owned by the decode task.
struct DecodeLoop {
    body: ByteStream,
    decoder: EventDecoder,
    closed: watch::Receiver<bool>,
}

impl DecodeLoop {
    async fn run(mut self, events: mpsc::Sender<Event>, terminal: TerminalSlot) {
        let mut delivered: u64 = 0;

        let outcome = loop {
            // Wait until the previous event has been taken before decoding
            // the next one.
            let permit = tokio::select! {
                biased;
                _ = wait_closed(&mut self.closed) => break Err(StreamError::ConnectionClosed),
                permit = events.reserve() => match permit {
                    Ok(permit) => permit,
                    // Receiver gone, nobody left to report to
                    Err(_) => break Ok(()),
                },
            };

            match self.next_event().await {
                Ok(Some(event)) => {
                    trace!(status = %event.status, id = %event.id, "Decoded event");
                    delivered += 1;
                    permit.send(event);
                }
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        match &outcome {
            Ok(()) => info!(delivered, "Event stream ended"),
            Err(StreamError::ConnectionClosed) => debug!(delivered, "Event stream closed"),
            Err(err) => warn!(
                delivered,
                code = err.error_code(),
                "Event stream failed: {}",
                err
            ),
        }

        // Record the outcome before the channel closes so a consumer that
        // sees the end of the stream always finds it.
        let _ = terminal.set(outcome.err());
        drop(self);
        drop(events);
    }

    /// Decode the next event, reading from the body only when the buffer
    /// holds no complete object. `Ok(None)` is a clean end of stream.
    async fn next_event(&mut self) -> Result<Option<Event>, StreamError> {
        loop {
            if let Some(event) = self.decoder.next_event()? {
                return Ok(Some(event));
            }

            let chunk = tokio::select! {
                biased;
                _ = wait_closed(&mut self.closed) => return Err(StreamError::ConnectionClosed),
                chunk = self.body.next() => chunk,
            };

            match chunk {
                Some(Ok(bytes)) => self.decoder.feed(&bytes),
                Some(Err(err)) => return Err(StreamError::Transport(err)),
                None => {
                    self.decoder.finish()?;
                    return Ok(None);
                }
            }
        }
    }
}

/// Resolve once the stream has been asked to close or its handle is gone.
async fn wait_closed(closed: &mut watch::Receiver<bool>) {
    let _ = closed.wait_for(|closed| *closed).await;
}
