//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Errors produced while parsing platform keys or looking up a username.
///
/// A check never fails as a whole: lookup errors are absorbed by the
/// aggregator and turned into [`LookupStatus::Error`](crate::LookupStatus::Error)
/// for the platform that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CheckError {
    /// Platform key outside the fixed set, from `Platform::from_str`
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Lookup did not settle in time
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result alias used throughout the crate
pub type CheckResult<T> = std::result::Result<T, CheckError>;
