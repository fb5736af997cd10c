//! Proxy error type and its HTTP rendering.
//!
//! Every variant renders as `{"error": "<fixed message>"}`; details stay in
//! the server log.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// Platform key outside the fixed set
    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    /// Request could not be sent, timed out, or the body could not be read
    #[error("Upstream transport error: {0}")]
    Transport(String),

    /// Upstream body is not valid JSON
    #[error("Upstream parse error: {0}")]
    Parse(String),
}

/// Wire body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ProxyError {
    /// Message sent to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidPlatform(_) => "Invalid platform",
            Self::UpstreamStatus(_) => "Failed to fetch from upstream",
            Self::Transport(_) | Self::Parse(_) => "Server error",
        }
    }

    /// Whether the error is caused by the caller, used for log levels.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidPlatform(_))
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPlatform(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Transport(_) | Self::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}
