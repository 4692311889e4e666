//! Typed models of the daemon's resources and event feed.

mod container;
mod event;
mod image;
mod system;

pub use container::{
    Config, Container, ContainerSummary, Empty, HostConfig, KeyValuePair, NetworkSettings, Port,
    State,
};
pub use event::{Event, EventError};
pub use image::{Image, ImageSummary};
pub use system::{Info, Version};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default.
///
/// The daemon encodes empty lists and maps as `null`, which `#[serde(default)]`
/// alone does not accept.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
