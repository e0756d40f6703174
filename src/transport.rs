//! HTTP transport
//!
//! The [`Transport`] trait is the seam between poll operations and the
//! network. [`HttpTransport`] is the `reqwest::blocking` implementation.

use reqwest::header::USER_AGENT;

use crate::config::ClientConfig;
use crate::error::Error;

/// Sends requests to the StrawPoll API and returns the raw response body.
///
/// Paths are relative to the API root, e.g. `/polls/42`. Implementations
/// return the body regardless of HTTP status since the service reports
/// errors in the body.
pub trait Transport {
    fn get(&self, path: &str) -> Result<String, Error>;

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, Error>;
}

/// Blocking HTTP transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    user_agent: String,
    http_client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let base_url = config.validated_base_url()?;
        let http_client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            http_client,
        })
    }

    /// API root all request paths are appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<String, Error> {
        let resp = request.header(USER_AGENT, &self.user_agent).send()?;
        let status = resp.status();
        let body = resp.text()?;
        tracing::debug!(status = %status, bytes = body.len(), "StrawPoll response received");
        Ok(body)
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<String, Error> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        self.send(self.http_client.get(&url))
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, Error> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");
        // `json` also sets `Content-Type: application/json`
        self.send(self.http_client.post(&url).json(body))
    }
}
