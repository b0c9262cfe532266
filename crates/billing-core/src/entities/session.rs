//! Session - the ephemeral result of a successful login or refresh

use chrono::{DateTime, Utc};

/// User summary returned with a session.
///
/// Deliberately excludes the password verifier and contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl From<&super::User> for SessionUser {
    fn from(user: &super::User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

/// Token pair plus user summary handed back to the caller.
///
/// Never stored: access tokens expire by clock alone and the refresh token's
/// persisted state lives in the token store.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    pub user: SessionUser,
}
