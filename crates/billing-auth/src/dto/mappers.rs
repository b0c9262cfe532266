//! Entity to DTO mappers

use billing_core::{Session, SessionUser};

use super::responses::{LoginResponse, SessionUserResponse};

impl From<&SessionUser> for SessionUserResponse {
    fn from(user: &SessionUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

impl From<&Session> for LoginResponse {
    fn from(session: &Session) -> Self {
        Self {
            success: true,
            message: None,
            access_token: session.access_token.clone(),
            access_token_expiry: session.access_token_expires_at,
            refresh_token: session.refresh_token.clone(),
            refresh_token_expiry: session.refresh_token_expires_at,
            user: SessionUserResponse::from(&session.user),
        }
    }
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self::from(&session)
    }
}
