//! Check state and its transitions.
//!
//! ```text
//!            start_check            finish (latest sequence)
//!   idle ───────────────► loading ───────────────────────► complete
//!     ▲                      │
//!     └─── reset / abandon ──┘   (a late finish of the abandoned check is dropped)
//! ```

use crate::types::{LookupStatus, Platform, StatusMap};

/// Observable state of the checker.
///
/// Mutated only through [`start_check`](Self::start_check),
/// [`PendingCheck::apply_result`], [`finish`](Self::finish),
/// [`abandon`](Self::abandon) and [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckState {
    username: String,
    statuses: StatusMap,
    in_flight: bool,
    sequence: u64,
}

impl CheckState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Username of the current or last completed check.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Sequence number of the most recently issued check.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Begin a check: every platform goes to `loading` before any lookup is issued.
    ///
    /// Returns `None` while another check is in flight.
    pub fn start_check(&mut self, username: &str, platforms: &[Platform]) -> Option<PendingCheck> {
        if self.in_flight {
            return None;
        }
        self.sequence += 1;
        self.username = username.to_string();
        self.statuses = StatusMap::loading(platforms);
        self.in_flight = true;

        Some(PendingCheck {
            sequence: self.sequence,
            username: self.username.clone(),
            results: StatusMap::new(),
        })
    }

    /// Publish a pending check's results in one write.
    ///
    /// Returns `false` and leaves the state untouched when a newer check has
    /// been issued (or the state was reset) since `pending` started.
    pub fn finish(&mut self, pending: PendingCheck) -> bool {
        if pending.sequence != self.sequence {
            log::debug!(
                "Dropping stale check #{} for '{}' (latest is #{})",
                pending.sequence,
                pending.username,
                self.sequence
            );
            return false;
        }
        self.statuses = pending.results;
        self.in_flight = false;
        true
    }

    /// Release the in-flight flag of check `sequence` whose future was dropped
    /// before [`finish`](Self::finish).
    ///
    /// Does nothing if that check already finished or a newer one was issued.
    pub fn abandon(&mut self, sequence: u64) -> bool {
        if !self.in_flight || sequence != self.sequence {
            return false;
        }
        log::debug!("Check #{sequence} for '{}' dropped before finishing", self.username);
        self.username.clear();
        self.statuses = StatusMap::new();
        self.in_flight = false;
        true
    }

    /// Abandon any in-flight check and return to idle.
    pub fn reset(&mut self) {
        self.sequence += 1;
        self.username.clear();
        self.statuses = StatusMap::new();
        self.in_flight = false;
    }
}

/// Results of an in-flight check, invisible until [`CheckState::finish`].
#[derive(Debug)]
pub struct PendingCheck {
    sequence: u64,
    username: String,
    results: StatusMap,
}

impl PendingCheck {
    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Record the terminal status of one platform.
    pub fn apply_result(&mut self, platform: Platform, status: LookupStatus) {
        self.results.set(platform, status);
    }
}
