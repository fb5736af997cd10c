//! # namecheck-core
//!
//! Username availability checks across a fixed set of platforms.
//!
//! A check fans out one lookup per platform through a [`LookupClient`]
//! (normally a [`ProxyClient`] talking to the `namecheck-web` relay), waits for
//! every lookup to settle and publishes the resulting [`StatusMap`] in a single
//! write.
//!
//! ## Supported Platforms
//!
//! | Platform | Key | Checked by default |
//! |----------|-----|--------------------|
//! | TikTok | `tiktok` | yes |
//! | Twitch | `twitch` | yes |
//! | Spotify | `spotify` | yes |
//! | SoundCloud | `soundcloud` | yes |
//! | Telegram | `telegram` | no |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use namecheck_core::{AvailabilityChecker, CheckOutcome, ProxyClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(ProxyClient::new("http://127.0.0.1:3000"));
//!     let checker = AvailabilityChecker::new(client);
//!
//!     if let CheckOutcome::Completed(report) = checker.check("foo").await {
//!         for (platform, status) in report.status_map().iter() {
//!             println!("{platform}: {status}");
//!         }
//!     }
//! }
//! ```

mod checker;
mod client;
mod error;
mod state;
mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use checker::{AvailabilityChecker, CheckOutcome, DEFAULT_LOOKUP_TIMEOUT_SECS};
pub use client::{LookupClient, ProxyClient};
pub use error::{CheckError, CheckResult};
pub use state::{CheckState, PendingCheck};
pub use types::{CheckReport, LookupStatus, Platform, PlatformCheckResult, PlatformInfo, StatusMap};
