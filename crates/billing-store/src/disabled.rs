//! Disabled token store for login-only deployments
//!
//! Mirrors a deployment where no durable store is wired: login still works
//! (the refresh token is handed out but not persisted), while refresh and
//! logout surface `StoreError::Unavailable`, which the service layer maps
//! to an explicit `NotImplemented` instead of an unhandled failure.

use async_trait::async_trait;
use billing_core::{
    RefreshTokenRecord, RevokeOutcome, RotateOutcome, StoreError, StoreResult, TokenStore,
};

/// A [`TokenStore`] that persists nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTokenStore;

impl DisabledTokenStore {
    /// Create a new disabled store
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TokenStore for DisabledTokenStore {
    async fn save(&self, record: RefreshTokenRecord) -> StoreResult<()> {
        tracing::debug!(
            user_id = record.user_id,
            "token store disabled; dropping refresh token"
        );
        Ok(())
    }

    async fn find(&self, _token: &str) -> StoreResult<Option<RefreshTokenRecord>> {
        Err(StoreError::Unavailable)
    }

    async fn rotate(
        &self,
        _presented: &str,
        _successor: RefreshTokenRecord,
    ) -> StoreResult<RotateOutcome> {
        Err(StoreError::Unavailable)
    }

    async fn revoke(&self, _token: &str) -> StoreResult<RevokeOutcome> {
        Err(StoreError::Unavailable)
    }
}
