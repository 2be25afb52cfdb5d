//! Shared error type across srepractice crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid or unreadable configuration.
    BadConfig,
    /// No route matched the request.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SreError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum SreError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SreError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SreError::BadConfig(_) => ClientCode::BadConfig,
            SreError::NotFound(_) => ClientCode::NotFound,
            SreError::Internal(_) => ClientCode::Internal,
        }
    }
}
