//! User entity - an account row owned by the identity store

use chrono::{DateTime, Utc};

/// User account as provisioned by the identity store.
///
/// Read-only to the authentication core: rows are created and maintained by
/// an external provisioning process and looked up through
/// [`crate::traits::UserDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    /// Password verifier (e.g. an Argon2 hash string), never the password.
    pub password_hash: String,
    pub role: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_number: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with the required fields
    pub fn new(
        user_id: i64,
        username: String,
        password_hash: String,
        role: String,
        email: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            username,
            password_hash,
            role,
            email,
            first_name: None,
            last_name: None,
            contact_number: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account can authenticate
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
