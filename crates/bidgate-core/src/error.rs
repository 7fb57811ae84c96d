//! Shared error type across bidgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Activity governance could not be set up for the account.
    Misconfigured,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Misconfigured => "MISCONFIGURED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BidgateError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BidgateError {
    /// Fatal: activity configuration does not cover the whole vocabulary.
    /// Never retried; the owning account/request context must be abandoned.
    #[error("activity configuration error: {0}")]
    Configuration(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl BidgateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BidgateError::Configuration(_) => ClientCode::Misconfigured,
            BidgateError::BadRequest(_) => ClientCode::BadRequest,
            BidgateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            BidgateError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Prefix the message with where it happened (e.g. a config path).
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            BidgateError::Configuration(m) => BidgateError::Configuration(format!("{ctx}: {m}")),
            BidgateError::BadRequest(m) => BidgateError::BadRequest(format!("{ctx}: {m}")),
            BidgateError::Internal(m) => BidgateError::Internal(format!("{ctx}: {m}")),
            other => other,
        }
    }
}
