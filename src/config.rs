//! Client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Identifying `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " v",
    env!("CARGO_PKG_VERSION"),
    " by ",
    env!("CARGO_PKG_AUTHORS")
);

/// StrawPoll API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, without the `/polls` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://strawpoll.me/api/v2".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse and check the base URL. Only `http` and `https` are accepted.
    pub fn validated_base_url(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::Config(format!(
                "unsupported URL scheme '{}' in base URL '{}'",
                other, self.base_url
            ))),
        }
    }
}
