use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::container::Config;

/// One entry of the image list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSummary {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repository: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub id: String,
    /// Unix timestamp in seconds
    pub created: i64,
    pub size: i64,
    pub virtual_size: i64,
}

/// Full description of an image as returned by inspect.
///
/// Unlike the rest of the API this payload uses lowercase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub created: DateTime<Utc>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container: String,
    pub container_config: Config,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub docker_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub architecture: String,
    #[serde(rename = "Size")]
    pub size: i64,
}
