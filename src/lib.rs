//! dockwire - a client for the container daemon's HTTP API
//!
//! The centerpiece is [`DockerClient::events`], which subscribes to the
//! daemon's live event feed and decodes it on a background task into an
//! [`EventStream`].
//!
//! ```ignore
//! use dockwire::{ClientConfig, DockerClient};
//!
//! let client = DockerClient::new(ClientConfig::from_env())?;
//! let mut events = client.events().await?;
//! while let Some(event) = events.recv().await {
//!     println!("{} {}", event.id, event.status);
//! }
//! if let Some(err) = events.error() {
//!     eprintln!("stream failed: {}", err);
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod traits;

pub use client::DockerClient;
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, ClientResult, StreamError};
pub use events::{EventStream, StreamState};
pub use models::Event;
