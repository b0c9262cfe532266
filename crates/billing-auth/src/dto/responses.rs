//! Response DTOs for the login API

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User summary included in a login response (never the password verifier)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

/// Successful login / refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub access_token: String,
    pub access_token_expiry: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expiry: DateTime<Utc>,
    pub user: SessionUserResponse,
}
