//! Storage port errors

use thiserror::Error;

/// Errors surfaced by [`crate::traits::TokenStore`] and
/// [`crate::traits::UserDirectory`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store is intentionally not wired in this deployment.
    /// Mapped to [`crate::AuthError::NotImplemented`] per operation.
    #[error("token store is not available in this deployment")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend error from any displayable source
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
