//! Upstream lookup service client.

use std::time::Duration;

use async_trait::async_trait;
use namecheck_core::Platform;
use namecheck_core::utils::truncate_for_log;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

use crate::error::ProxyError;

/// Root of the upstream service; the platform key and username are appended.
pub const DEFAULT_UPSTREAM_ROOT: &str = "https://api.instantusername.com/c/";

/// Identifying header sent with every forwarded lookup.
pub const UPSTREAM_USER_AGENT: &str = "Mozilla/5.0 (compatible; NextCheckBot/1.0)";

/// Forwards exactly one lookup per call. No retry, no cache.
#[async_trait]
pub trait UpstreamLookup: Send + Sync {
    /// Fetch the upstream JSON body for `username` on `platform`.
    async fn fetch(&self, platform: Platform, username: &str) -> Result<Value, ProxyError>;
}

/// [`UpstreamLookup`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    root: String,
}

impl HttpUpstream {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(root: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, root))
    }

    pub fn with_client(client: reqwest::Client, root: &str) -> Self {
        let root = if root.ends_with('/') {
            root.to_string()
        } else {
            format!("{root}/")
        };
        Self { client, root }
    }

    /// Base URL for a platform, e.g. `https://api.instantusername.com/c/tiktok/`.
    pub fn base_url(&self, platform: Platform) -> String {
        format!("{}{}/", self.root, platform.key())
    }

    pub fn lookup_url(&self, platform: Platform, username: &str) -> String {
        format!("{}{}", self.base_url(platform), urlencoding::encode(username))
    }
}

#[async_trait]
impl UpstreamLookup for HttpUpstream {
    async fn fetch(&self, platform: Platform, username: &str) -> Result<Value, ProxyError> {
        let url = self.lookup_url(platform, username);
        tracing::debug!(%platform, %url, "forwarding lookup");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, UPSTREAM_USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // upstream body is discarded
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Transport(format!("Failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(%platform, body = %truncate_for_log(&body), "upstream body is not JSON");
            ProxyError::Parse(e.to_string())
        })
    }
}
