//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! USER_AGENT and timeout configuration, and turns non-2xx answers into
//! [`ToolError::UpstreamStatus`].

use std::time::Duration;

use serde_json::Value;

use crate::config::network::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{upstream_detail, Result, ToolError};

/// Something that can answer a GET with a JSON document.
///
/// Handlers depend on this rather than on [`HttpClient`] directly.
pub trait JsonSource: Send + Sync {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// Shared HTTP client with standard configuration
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a client with the default timeouts
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a custom overall request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self { inner })
    }
}

impl JsonSource for HttpClient {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let resp = self.inner.get(url).query(query).send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| upstream_detail(&v));
            tracing::debug!(url, status = status.as_u16(), "upstream returned error status");
            return Err(ToolError::UpstreamStatus {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| ToolError::Decode(e.to_string()))
    }
}
