//! Availability aggregator.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use futures::future::join_all;
use tokio::time::{Duration, timeout};

use crate::client::LookupClient;
use crate::error::CheckError;
use crate::state::CheckState;
use crate::types::{CheckReport, LookupStatus, Platform, PlatformCheckResult};

/// Per-lookup timeout in seconds.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Result of [`AvailabilityChecker::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The username was empty after trimming; nothing was sent and the state is unchanged.
    Skipped,
    /// Another check is still in flight; nothing was sent.
    InProgress,
    /// The check ran and its status map was published.
    Completed(CheckReport),
    /// The check ran but was abandoned by [`AvailabilityChecker::reset`] before it
    /// finished; its results were not published.
    Superseded(CheckReport),
}

/// Fans one lookup per platform out concurrently and publishes the combined
/// status map once every lookup has settled.
///
/// The state lock is never held across an await point.
pub struct AvailabilityChecker {
    client: Arc<dyn LookupClient>,
    platforms: Vec<Platform>,
    lookup_timeout: Duration,
    state: RwLock<CheckState>,
}

/// Releases the in-flight flag if a `check` future is dropped mid-flight.
struct InFlightGuard<'a> {
    state: &'a RwLock<CheckState>,
    sequence: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        // no-op once the check finished or was superseded
        write_state(self.state).abandon(self.sequence);
    }
}

fn read_state(state: &RwLock<CheckState>) -> RwLockReadGuard<'_, CheckState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_state(state: &RwLock<CheckState>) -> RwLockWriteGuard<'_, CheckState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

impl AvailabilityChecker {
    /// Checker over [`Platform::DEFAULT_CHECKED`] with the default lookup timeout.
    pub fn new(client: Arc<dyn LookupClient>) -> Self {
        Self {
            client,
            platforms: Platform::DEFAULT_CHECKED.to_vec(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            state: RwLock::new(CheckState::new()),
        }
    }

    /// Replace the checked platforms. Duplicates are dropped, first occurrence wins.
    #[must_use]
    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        let mut seen = BTreeSet::new();
        self.platforms = platforms.into_iter().filter(|p| seen.insert(*p)).collect();
        self
    }

    #[must_use]
    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Copy of the current state, for rendering.
    pub fn snapshot(&self) -> CheckState {
        read_state(&self.state).clone()
    }

    /// Abandon any in-flight check; its results will not be published.
    pub fn reset(&self) {
        write_state(&self.state).reset();
    }

    /// Check `username` on every configured platform.
    ///
    /// Dropping the returned future abandons the lookups and returns the
    /// state to idle, so the next check can start.
    pub async fn check(&self, username: &str) -> CheckOutcome {
        let username = username.trim();
        if username.is_empty() {
            log::debug!("Skipping check: username is empty");
            return CheckOutcome::Skipped;
        }

        let started = write_state(&self.state).start_check(username, &self.platforms);
        let Some(mut pending) = started else {
            log::warn!("Check for '{username}' refused: another check is in flight");
            return CheckOutcome::InProgress;
        };
        let _in_flight = InFlightGuard {
            state: &self.state,
            sequence: pending.sequence(),
        };

        log::info!(
            "Check #{} for '{username}' on {} platform(s)",
            pending.sequence(),
            self.platforms.len()
        );
        let start_time = Instant::now();

        let futures: Vec<_> = self
            .platforms
            .iter()
            .map(|&platform| self.lookup_platform(platform, username))
            .collect();
        let results = join_all(futures).await;

        for result in &results {
            pending.apply_result(result.platform, result.status);
        }

        // u128 -> u64: elapsed millis of a single check will never exceed u64::MAX
        #[allow(clippy::cast_possible_truncation)]
        let total_time_ms = start_time.elapsed().as_millis() as u64;

        let report = CheckReport {
            username: username.to_string(),
            results,
            total_time_ms,
        };

        let published = write_state(&self.state).finish(pending);
        if published {
            CheckOutcome::Completed(report)
        } else {
            CheckOutcome::Superseded(report)
        }
    }

    /// Look up one platform; every failure becomes [`LookupStatus::Error`].
    async fn lookup_platform(&self, platform: Platform, username: &str) -> PlatformCheckResult {
        let query_start = Instant::now();
        let result = timeout(self.lookup_timeout, self.client.lookup(platform, username)).await;
        // u128 -> u64: elapsed millis of a lookup will never exceed u64::MAX
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = query_start.elapsed().as_millis() as u64;

        let (status, error) = match result {
            Ok(Ok(body)) => (LookupStatus::from_response(&body), None),
            Ok(Err(e)) => {
                log::error!("[{platform}] Lookup failed: {e}");
                (LookupStatus::Error, Some(e.to_string()))
            }
            Err(_) => {
                let e = CheckError::Timeout(format!(
                    "no answer within {}ms",
                    self.lookup_timeout.as_millis()
                ));
                log::warn!("[{platform}] {e}");
                (LookupStatus::Error, Some(e.to_string()))
            }
        };

        log::debug!("[{platform}] {status} in {elapsed}ms");
        PlatformCheckResult {
            platform,
            status,
            error,
            response_time_ms: elapsed,
        }
    }
}
