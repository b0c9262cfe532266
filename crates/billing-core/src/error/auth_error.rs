//! Authentication error taxonomy
//!
//! A closed set of variants; the API boundary maps these to HTTP statuses
//! and the client maps HTTP statuses back into them.

use thiserror::Error;

/// Errors produced by the authentication core.
///
/// `Unauthorized` is deliberately detail-free so the caller cannot learn
/// whether the username or the password was wrong.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("{0} is not available in this deployment")]
    NotImplemented(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Unauthorized => 401,
            Self::NotImplemented(_) => 501,
            Self::Internal(_) => 500,
        }
    }

    /// Stable error code for API responses and logs
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error from any displayable source
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
