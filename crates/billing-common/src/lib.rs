//! # billing-common
//!
//! Shared utilities including configuration, the access/refresh token codec,
//! password hashing, and telemetry setup.

pub mod auth;
pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_refresh_token, hash_password, verify_password, AccessClaims, Argon2Verifier,
    IssuedAccessToken, JwtService,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, Environment, HttpClientConfig, JwtConfig,
    SeedUserConfig, ServerConfig,
};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
