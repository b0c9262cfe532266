//! Route definitions
//!
//! The login routes keep the casing published to existing clients
//! (`/api/Login/...`).

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, login};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().merge(login_routes()).merge(health_routes())
}

/// Authentication routes
fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/api/Login/login", post(login::login))
        .route("/api/Login/refresh", post(login::refresh))
        .route("/api/Login/logout", post(login::logout))
        .route("/api/Login/me", get(login::me))
}

/// Health check routes
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
