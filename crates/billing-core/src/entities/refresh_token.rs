//! Refresh token record - the persisted half of a session

use chrono::{DateTime, Utc};

/// Persisted refresh token state.
///
/// Revocation is a one-way transition: once `revoked` is set the record must
/// never validate again. Rotation retires a record in the same store
/// operation that installs its successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    /// Opaque token value as handed to the client
    pub token: String,
    pub user_id: i64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshTokenRecord {
    /// Create a fresh, non-revoked record
    pub fn new(token: String, user_id: i64, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            issued_at: Utc::now(),
            expires_at,
            revoked: false,
        }
    }

    /// Check if the token is revoked
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    /// Check if the token is expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the token is valid (not revoked and not expired)
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}
