//! In-memory refresh-token store
//!
//! A single mutex guards the whole map, so `rotate` and `revoke` are one
//! critical section each: of two concurrent rotations of the same token,
//! exactly one observes a valid record. No lock is ever held across an
//! await point.

use std::collections::HashMap;

use async_trait::async_trait;
use billing_core::{RefreshTokenRecord, RevokeOutcome, RotateOutcome, StoreResult, TokenStore};
use parking_lot::Mutex;

/// In-memory [`TokenStore`] with linearizable rotation
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held (live and revoked)
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, record: RefreshTokenRecord) -> StoreResult<()> {
        tracing::debug!(user_id = record.user_id, "storing refresh token");
        self.inner.lock().insert(record.token.clone(), record);
        Ok(())
    }

    async fn find(&self, token: &str) -> StoreResult<Option<RefreshTokenRecord>> {
        Ok(self.inner.lock().get(token).cloned())
    }

    async fn rotate(
        &self,
        presented: &str,
        successor: RefreshTokenRecord,
    ) -> StoreResult<RotateOutcome> {
        let mut map = self.inner.lock();

        let retired = match map.get_mut(presented) {
            None => return Ok(RotateOutcome::Missing),
            Some(record) if record.is_revoked() => return Ok(RotateOutcome::Revoked),
            Some(record) if record.is_expired() => return Ok(RotateOutcome::Expired),
            Some(record) => {
                record.revoked = true;
                record.clone()
            }
        };

        tracing::debug!(user_id = retired.user_id, "rotated refresh token");
        map.insert(successor.token.clone(), successor);
        Ok(RotateOutcome::Rotated(retired))
    }

    async fn revoke(&self, token: &str) -> StoreResult<RevokeOutcome> {
        let mut map = self.inner.lock();

        match map.get_mut(token) {
            None => Ok(RevokeOutcome::Missing),
            Some(record) if record.is_revoked() => Ok(RevokeOutcome::AlreadyRevoked),
            Some(record) => {
                record.revoked = true;
                tracing::debug!(user_id = record.user_id, "revoked refresh token");
                Ok(RevokeOutcome::Revoked)
            }
        }
    }
}
