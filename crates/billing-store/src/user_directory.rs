//! In-memory user directory
//!
//! Read-mostly: rows are written once by provisioning and read on every
//! login, so a sharded concurrent map fits without external locking.

use async_trait::async_trait;
use billing_core::{StoreResult, User, UserDirectory};
use dashmap::DashMap;

/// In-memory [`UserDirectory`] keyed by username, with an id index
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    by_username: DashMap<String, User>,
    username_by_id: DashMap<i64, String>,
}

impl MemoryUserDirectory {
    /// Create an empty directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a user row.
    ///
    /// This is the external provisioning hook; the authentication core only
    /// ever reads. Re-inserting a username replaces the row.
    pub fn insert(&self, user: User) {
        self.username_by_id.insert(user.user_id, user.username.clone());
        self.by_username.insert(user.username.clone(), user);
    }

    /// Number of provisioned users
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    /// Whether the directory has no users
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.by_username.get(username).map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, user_id: i64) -> StoreResult<Option<User>> {
        let Some(username) = self.username_by_id.get(&user_id) else {
            return Ok(None);
        };
        Ok(self
            .by_username
            .get(username.value())
            .map(|u| u.value().clone()))
    }
}
