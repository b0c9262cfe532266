//! Test helpers for integration tests
//!
//! Spins up the real Axum application on an OS-assigned loopback port with
//! in-memory stores and the seeded development user, so the suite runs
//! hermetically.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use billing_api::{create_app, create_app_state};
use billing_common::{
    AppConfig, AppSettings, CorsConfig, Environment, HttpClientConfig, JwtConfig, SeedUserConfig,
    ServerConfig,
};
use reqwest::{Client, Response};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Build a self-contained test configuration with the seeded dev user
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "billing-api".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            // The listener binds port 0; this value is not used by tests
            port: 0,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-key-long-enough".to_string(),
            issuer: "billing-api".to_string(),
            audience: "billing-client".to_string(),
            access_token_minutes: 15,
            refresh_token_days: 7,
        },
        http: HttpClientConfig {
            base_url: "http://127.0.0.1:0".to_string(),
            timeout_secs: 10,
            retry_max_attempts: 3,
            retry_base_delay_ms: 100,
        },
        cors: CorsConfig::default(),
        seed: Some(SeedUserConfig::development_default()),
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the default test config
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }
}
