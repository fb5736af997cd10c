//! Lookup clients.
//!
//! [`LookupClient`] is the seam between the aggregator and the network.
//! [`ProxyClient`] is the production implementation and talks to the
//! `namecheck-web` relay at `GET {base}/api/lookup/{platform}/{username}`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CheckError, CheckResult};
use crate::types::Platform;
use crate::utils::truncate_for_log;

/// One username lookup against one platform.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Fetch and decode the lookup body.
    ///
    /// Any HTTP status is accepted as long as the body is JSON; interpreting
    /// the body is left to [`LookupStatus::from_response`](crate::LookupStatus::from_response).
    async fn lookup(&self, platform: Platform, username: &str) -> CheckResult<Value>;
}

/// [`LookupClient`] backed by the lookup proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// Create a client for the proxy at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Proxy URL for one lookup; the username is percent-encoded as a path segment.
    pub fn lookup_url(&self, platform: Platform, username: &str) -> String {
        format!(
            "{}/api/lookup/{}/{}",
            self.base_url,
            platform.key(),
            urlencoding::encode(username)
        )
    }
}

#[async_trait]
impl LookupClient for ProxyClient {
    async fn lookup(&self, platform: Platform, username: &str) -> CheckResult<Value> {
        let url = self.lookup_url(platform, username);
        log::debug!("[{platform}] GET {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                CheckError::Timeout(e.to_string())
            } else {
                CheckError::NetworkError(e.to_string())
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{platform}] Response Status: {status_code}");

        let body = response
            .text()
            .await
            .map_err(|e| CheckError::NetworkError(format!("Failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            log::warn!("[{platform}] JSON parse failed: {e}");
            log::debug!("[{platform}] Raw response: {}", truncate_for_log(&body));
            CheckError::ParseError(e.to_string())
        })
    }
}
