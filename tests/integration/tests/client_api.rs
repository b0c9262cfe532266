//! End-to-end tests driving the server through `billing-client`
//!
//! Proves the client and server wire shapes against each other.

use anyhow::Result;
use billing_client::{ApiClient, AuthApi, ClientError};
use billing_common::HttpClientConfig;
use chrono::Utc;
use integration_tests::helpers::TestServer;

fn auth_api(server: &TestServer) -> Result<AuthApi> {
    let config = HttpClientConfig {
        base_url: server.base_url(),
        timeout_secs: 10,
        retry_max_attempts: 3,
        retry_base_delay_ms: 100,
    };
    Ok(AuthApi::new(ApiClient::from_config(&config)?))
}

#[tokio::test]
async fn full_session_lifecycle() -> Result<()> {
    let server = TestServer::start().await?;
    let api = auth_api(&server)?;

    // Login
    let session = api.login("prashant", "1234").await?;
    assert!(!session.access_token.is_empty());
    assert_eq!(session.user.username, "prashant");
    assert_eq!(session.user.role, "Admin");
    assert!(session.access_token_expires_at > Utc::now());
    assert!(session.refresh_token_expires_at > session.access_token_expires_at);

    // The access token works on the protected endpoint
    let user = api.current_user(&session.access_token).await?;
    assert_eq!(user.user_id, 1);

    // Refresh rotates
    let rotated = api.refresh(&session.refresh_token).await?;
    assert_ne!(rotated.refresh_token, session.refresh_token);

    // The retired token is now a replay
    let replay = api.refresh(&session.refresh_token).await;
    assert!(matches!(replay, Err(ClientError::Unauthorized)));

    // Logout ends the chain
    api.logout(&rotated.refresh_token).await?;
    let after_logout = api.refresh(&rotated.refresh_token).await;
    assert!(matches!(after_logout, Err(ClientError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn wrong_password_maps_to_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;
    let api = auth_api(&server)?;

    let result = api.login("prashant", "wrong").await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn blank_credentials_map_to_invalid_input() -> Result<()> {
    let server = TestServer::start().await?;
    let api = auth_api(&server)?;

    match api.login("", "").await {
        Err(ClientError::InvalidInput(message)) => {
            assert!(message.contains("required"));
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn stale_access_token_is_rejected_on_me() -> Result<()> {
    let server = TestServer::start().await?;
    let api = auth_api(&server)?;

    let result = api.current_user("not-a-real-token").await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_surfaces_as_transient() -> Result<()> {
    // Grab a port that nothing is listening on
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
    let dead_addr = listener.local_addr()?;
    drop(listener);

    let config = HttpClientConfig {
        base_url: format!("http://{dead_addr}"),
        timeout_secs: 1,
        retry_max_attempts: 2,
        retry_base_delay_ms: 10,
    };
    let api = AuthApi::new(ApiClient::from_config(&config)?);

    let result = api.login("prashant", "1234").await;
    match result {
        Err(ClientError::Transient { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected Transient, got {other:?}"),
    }
    Ok(())
}
