//! Login endpoint handlers
//!
//! POST /api/Login/login, /api/Login/refresh, /api/Login/logout, and the
//! bearer-protected GET /api/Login/me.

use axum::{extract::State, http::StatusCode, Json};
use billing_auth::{LoginRequest, LoginResponse, RefreshRequest, SessionUserResponse};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Authenticate credentials and open a session
///
/// POST /api/Login/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if let Some(stamp) = request.log_in_time {
        tracing::debug!(login_time = %stamp, "client-stamped login time");
    }
    let credentials = request.into_credentials();
    let session = state.auth_service().login(&credentials).await?;
    Ok(Json(LoginResponse::from(&session)))
}

/// Rotate a refresh token into a new session
///
/// POST /api/Login/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = state.auth_service().refresh(&request.refresh_token).await?;
    Ok(Json(LoginResponse::from(&session)))
}

/// Revoke a refresh token
///
/// POST /api/Login/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<StatusCode> {
    state.auth_service().logout(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// Return the user summary behind the presented access token
///
/// GET /api/Login/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SessionUserResponse>> {
    let user = state.auth_service().current_user(auth.user_id).await?;
    Ok(Json(SessionUserResponse::from(&user)))
}
