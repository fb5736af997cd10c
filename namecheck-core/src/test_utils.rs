//! Test helpers: a scripted [`LookupClient`] that records every call.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, Semaphore};

use crate::client::LookupClient;
use crate::error::{CheckError, CheckResult};
use crate::types::Platform;

/// Scripted answer for one platform.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Decoded body
    Json(Value),
    /// Lookup fails with this error
    Fail(CheckError),
    /// Lookup never settles
    Hang,
}

impl MockReply {
    pub fn available(available: bool) -> Self {
        Self::Json(serde_json::json!({ "data": { "available": available } }))
    }
}

pub struct MockLookupClient {
    replies: HashMap<Platform, MockReply>,
    calls: Mutex<Vec<(Platform, String)>>,
    call_count: AtomicUsize,
    /// When set, every lookup waits for a permit before answering
    gate: Option<Arc<Semaphore>>,
}

impl MockLookupClient {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            gate: None,
        }
    }

    #[must_use]
    pub fn reply(mut self, platform: Platform, reply: MockReply) -> Self {
        self.replies.insert(platform, reply);
        self
    }

    /// Hold every lookup until permits are added to the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub async fn calls(&self) -> Vec<(Platform, String)> {
        self.calls.lock().await.clone()
    }

    /// Poll until at least `n` lookups have been issued (bounded to ~2s).
    pub async fn wait_for_calls(&self, n: usize) {
        for _ in 0..400 {
            if self.call_count() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl LookupClient for MockLookupClient {
    async fn lookup(&self, platform: Platform, username: &str) -> CheckResult<Value> {
        self.calls.lock().await.push((platform, username.to_string()));
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        match self.replies.get(&platform) {
            Some(MockReply::Json(body)) => Ok(body.clone()),
            Some(MockReply::Fail(e)) => Err(e.clone()),
            Some(MockReply::Hang) => std::future::pending().await,
            None => Err(CheckError::NetworkError(format!(
                "no scripted reply for {platform}"
            ))),
        }
    }
}
