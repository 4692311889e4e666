use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_default;

/// An exposed port as reported by the container list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Port {
    pub private_port: i64,
    pub public_port: i64,
    #[serde(rename = "Type")]
    pub protocol: String,
}

/// One entry of the container list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerSummary {
    pub id: String,
    pub image: String,
    pub command: String,
    /// Unix timestamp in seconds
    pub created: i64,
    pub status: String,
    #[serde(deserialize_with = "null_default")]
    pub ports: Vec<Port>,
    pub size_rw: i64,
    pub size_root_fs: i64,
}

/// Placeholder value of set-like maps (`{"/data": {}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// Creation-time configuration of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    pub hostname: String,
    pub domainname: String,
    pub user: String,
    /// Memory limit in bytes
    pub memory: i64,
    /// Memory plus swap in bytes, -1 disables swap
    pub memory_swap: i64,
    /// Relative CPU weight
    pub cpu_shares: i64,
    pub attach_stdin: bool,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
    #[serde(deserialize_with = "null_default")]
    pub port_specs: Vec<String>,
    pub tty: bool,
    pub open_stdin: bool,
    pub stdin_once: bool,
    #[serde(deserialize_with = "null_default")]
    pub env: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub cmd: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub dns: Vec<String>,
    /// Image name as given by the operator
    pub image: String,
    #[serde(deserialize_with = "null_default")]
    pub volumes: HashMap<String, Empty>,
    pub volumes_from: String,
    pub working_dir: String,
    #[serde(deserialize_with = "null_default")]
    pub entrypoint: Vec<String>,
    pub network_disabled: bool,
    pub privileged: bool,
}

/// Runtime state of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct State {
    pub running: bool,
    pub pid: i64,
    pub exit_code: i64,
    pub started_at: DateTime<Utc>,
    pub ghost: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkSettings {
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(rename = "IPPrefixLen")]
    pub ip_prefix_len: i64,
    pub gateway: String,
    pub bridge: String,
    /// Protocol ("Tcp", "Udp") to container-port to host-port
    #[serde(deserialize_with = "null_default")]
    pub port_mapping: HashMap<String, HashMap<String, String>>,
}

/// Full description of a container as returned by inspect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Container {
    #[serde(rename = "ID")]
    pub id: String,
    pub created: DateTime<Utc>,
    pub path: String,
    #[serde(deserialize_with = "null_default")]
    pub args: Vec<String>,
    pub config: Option<Config>,
    pub state: State,
    pub image: String,
    pub network_settings: Option<NetworkSettings>,
    pub sys_init_path: String,
    pub resolv_conf_path: String,
    pub hostname_path: String,
    pub hosts_path: String,
    #[serde(rename = "VolumesRW", deserialize_with = "null_default")]
    pub volumes_rw: HashMap<String, bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Host-side settings applied when a container starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostConfig {
    #[serde(deserialize_with = "null_default")]
    pub binds: Vec<String>,
    #[serde(rename = "ContainerIDFile")]
    pub container_id_file: String,
    #[serde(deserialize_with = "null_default")]
    pub lxc_conf: Vec<KeyValuePair>,
}
