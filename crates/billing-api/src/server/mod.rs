//! Server setup and initialization
//!
//! Builds the Axum application, wires the in-memory stores, provisions the
//! seed user, and runs the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use billing_auth::AuthService;
use billing_common::{hash_password, AppConfig, Argon2Verifier, JwtService, SeedUserConfig};
use billing_core::User;
use billing_store::{MemoryTokenStore, MemoryUserDirectory};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let users = Arc::new(MemoryUserDirectory::new());
    let tokens = Arc::new(MemoryTokenStore::new());

    // Provision the seed user: explicit config wins, the development
    // default fills in only outside production.
    let seed = config.seed.clone().or_else(|| {
        if config.app.env.is_development() {
            Some(SeedUserConfig::development_default())
        } else {
            None
        }
    });

    match seed {
        Some(seed) => {
            let password_hash =
                hash_password(&seed.password).context("failed to hash seed user password")?;
            users.insert(User::new(
                1,
                seed.username.clone(),
                password_hash,
                seed.role,
                seed.email,
            ));
            info!(username = %seed.username, "provisioned seed user");
        }
        None => {
            warn!("no seed user configured; the user directory starts empty");
        }
    }

    let jwt = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
        config.jwt.access_token_minutes,
    ));

    let auth = Arc::new(AuthService::new(
        users,
        tokens,
        Arc::new(Argon2Verifier::new()),
        Arc::clone(&jwt),
        config.jwt.refresh_token_days,
    ));

    Ok(AppState::new(auth, jwt, config))
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Load state, build the app, and serve it
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server.address()))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
