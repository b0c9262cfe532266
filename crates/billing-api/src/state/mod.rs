//! Application state
//!
//! Holds the shared state for the Axum application: the authentication
//! service, the token codec, and configuration.

use std::sync::Arc;

use billing_auth::AuthService;
use billing_common::{AppConfig, JwtService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    auth: Arc<AuthService>,
    jwt: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(auth: Arc<AuthService>, jwt: Arc<JwtService>, config: AppConfig) -> Self {
        Self {
            auth,
            jwt,
            config: Arc::new(config),
        }
    }

    /// Get the authentication service
    pub fn auth_service(&self) -> &AuthService {
        &self.auth
    }

    /// Get the access-token codec
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &"AuthService")
            .field("config", &"AppConfig")
            .finish()
    }
}
