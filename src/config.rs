//! Client configuration.

use crate::error::ClientError;

/// Address the daemon listens on when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4243";

/// Environment variable holding the daemon address.
pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

/// Configuration for a [`DockerClient`](crate::client::DockerClient).
///
/// # Example
///
/// ```ignore
/// use dockwire::config::ClientConfig;
///
/// let config = ClientConfig::new("http://10.0.0.5:4243")
///     .with_user_agent("my-tool/1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the daemon, without a trailing slash
    pub endpoint: String,
    /// Value of the `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl ClientConfig {
    /// Create a config for the given endpoint.
    ///
    /// `tcp://` addresses are rewritten to `http://`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: normalize_endpoint(&endpoint.into()),
            user_agent: default_user_agent(),
        }
    }

    /// Set the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create config from the `DOCKER_HOST` environment variable, falling
    /// back to [`DEFAULT_ENDPOINT`] when it is unset or empty.
    pub fn from_env() -> Self {
        match std::env::var(DOCKER_HOST_ENV) {
            Ok(host) if !host.trim().is_empty() => Self::new(host.trim()),
            _ => Self::default(),
        }
    }

    /// Check that the endpoint is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ClientError> {
        let invalid = |reason: String| ClientError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{}'", other))),
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(())
    }

    /// Full URL for an API path such as `/events`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

fn default_user_agent() -> String {
    format!("dockwire/{}", env!("CARGO_PKG_VERSION"))
}

fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = match endpoint.strip_prefix("tcp://") {
        Some(rest) => format!("http://{}", rest),
        None => endpoint.to_string(),
    };
    endpoint.trim_end_matches('/').to_string()
}
