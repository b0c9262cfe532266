//! Request DTOs for the login API

use billing_core::Credentials;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Login request body
///
/// `logInTime` is accepted for compatibility with existing clients that
/// stamp their login attempts; the server only logs it.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
    #[serde(default)]
    pub log_in_time: Option<DateTime<Utc>>,
}

impl LoginRequest {
    /// Convert into domain credentials
    #[must_use]
    pub fn into_credentials(self) -> Credentials {
        Credentials::new(self.user_name, self.password)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("log_in_time", &self.log_in_time)
            .finish()
    }
}

/// Refresh / logout request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}
