//! Port traits for identity lookup, token persistence, and credential checks
//!
//! The domain layer defines what it needs; the infrastructure layer
//! (`billing-store`, `billing-common`) provides the implementations.

use async_trait::async_trait;

use crate::entities::{RefreshTokenRecord, User};
use crate::error::{AuthError, StoreResult};

// ============================================================================
// User Directory
// ============================================================================

/// Read-only access to provisioned user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find a user by numeric id
    async fn find_by_id(&self, user_id: i64) -> StoreResult<Option<User>>;
}

// ============================================================================
// Token Store
// ============================================================================

/// Result of an atomic rotation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The presented token was valid; it is now revoked and the successor
    /// is persisted. Carries the retired record.
    Rotated(RefreshTokenRecord),
    /// No record exists for the presented token value
    Missing,
    /// The record exists but its expiry has passed
    Expired,
    /// The record was already revoked - a possible replay
    Revoked,
}

/// Result of a revocation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// The token was active and is now revoked
    Revoked,
    /// The token had already been revoked
    AlreadyRevoked,
    /// No record exists for the token value
    Missing,
}

/// Durable refresh-token state.
///
/// `rotate` and `revoke` must be linearizable per token value: of two
/// concurrent rotations of the same token, exactly one may observe a valid
/// record; the other must see `Revoked`. Implementations guarantee this with
/// a per-store lock or a compare-and-swap on the revoked flag.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a freshly issued record
    async fn save(&self, record: RefreshTokenRecord) -> StoreResult<()>;

    /// Look up a record by token value
    async fn find(&self, token: &str) -> StoreResult<Option<RefreshTokenRecord>>;

    /// Atomically revoke `presented` and install `successor`.
    ///
    /// The validity of the presented record is re-checked inside the same
    /// critical section that installs the successor, so callers may use an
    /// earlier `find` only as a hint.
    async fn rotate(
        &self,
        presented: &str,
        successor: RefreshTokenRecord,
    ) -> StoreResult<RotateOutcome>;

    /// Revoke a token. One-way: a revoked record never validates again.
    async fn revoke(&self, token: &str) -> StoreResult<RevokeOutcome>;
}

// ============================================================================
// Credential Verifier
// ============================================================================

/// Compares a candidate password against a stored verifier.
///
/// Implementations must compare in constant time with respect to the
/// candidate (e.g. Argon2 hash verification); plain string equality is not
/// an acceptable implementation.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `Ok(true)` when the candidate matches the stored verifier.
    ///
    /// # Errors
    /// Returns an error if the stored verifier is malformed.
    fn verify(&self, candidate: &str, verifier: &str) -> Result<bool, AuthError>;
}
