//! End-to-end tests for the login API over real HTTP

use anyhow::Result;
use integration_tests::helpers::TestServer;
use serde_json::{json, Value};

#[tokio::test]
async fn health_check_responds() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/health").await?;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn login_with_seeded_credentials() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post(
            "/api/Login/login",
            &json!({"userName": "prashant", "password": "1234"}),
        )
        .await?;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());
    assert!(body.get("accessTokenExpiry").is_some());
    assert!(body.get("refreshTokenExpiry").is_some());
    assert_eq!(body["user"]["username"], "prashant");
    assert_eq!(body["user"]["role"], "Admin");
    // The verifier never leaves the server
    assert!(body["user"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_a_generic_401() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post(
            "/api/Login/login",
            &json!({"userName": "prashant", "password": "wrong"}),
        )
        .await?;
    assert_eq!(response.status(), 401);

    let body: Value = response.json().await?;
    let message = body["message"].as_str().unwrap();
    // Generic: must not disclose which field was wrong
    assert!(!message.to_lowercase().contains("password was"));
    assert!(!message.to_lowercase().contains("username was"));
    // No token fields populated
    assert!(body.get("accessToken").is_none());
    assert!(body.get("refreshToken").is_none());
    Ok(())
}

#[tokio::test]
async fn login_with_unknown_user_matches_wrong_password_shape() -> Result<()> {
    let server = TestServer::start().await?;

    let wrong_password = server
        .post(
            "/api/Login/login",
            &json!({"userName": "prashant", "password": "wrong"}),
        )
        .await?;
    let unknown_user = server
        .post(
            "/api/Login/login",
            &json!({"userName": "nobody", "password": "1234"}),
        )
        .await?;

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_user.status(), 401);

    // Identical bodies: the response discloses nothing about which field failed
    let a: Value = wrong_password.json().await?;
    let b: Value = unknown_user.json().await?;
    assert_eq!(a, b);
    Ok(())
}

#[tokio::test]
async fn login_with_blank_input_is_400() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post("/api/Login/login", &json!({"userName": "  ", "password": ""}))
        .await?;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await?;
    assert!(body["message"].as_str().unwrap().contains("required"));
    Ok(())
}

#[tokio::test]
async fn refresh_rotates_and_retires_the_presented_token() -> Result<()> {
    let server = TestServer::start().await?;

    let login: Value = server
        .post(
            "/api/Login/login",
            &json!({"userName": "prashant", "password": "1234"}),
        )
        .await?
        .json()
        .await?;
    let first_refresh_token = login["refreshToken"].as_str().unwrap().to_string();

    let response = server
        .post(
            "/api/Login/refresh",
            &json!({"refreshToken": first_refresh_token}),
        )
        .await?;
    assert_eq!(response.status(), 200);

    let rotated: Value = response.json().await?;
    assert_eq!(rotated["success"], true);
    assert_eq!(rotated["user"]["username"], "prashant");
    assert_ne!(rotated["refreshToken"], login["refreshToken"]);

    // Replaying the retired token is rejected
    let replay = server
        .post(
            "/api/Login/refresh",
            &json!({"refreshToken": first_refresh_token}),
        )
        .await?;
    assert_eq!(replay.status(), 401);

    // The successor still rotates
    let again = server
        .post(
            "/api/Login/refresh",
            &json!({"refreshToken": rotated["refreshToken"].as_str().unwrap()}),
        )
        .await?;
    assert_eq!(again.status(), 200);
    Ok(())
}

#[tokio::test]
async fn refresh_with_unknown_token_is_401() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post("/api/Login/refresh", &json!({"refreshToken": "never-issued"}))
        .await?;
    assert_eq!(response.status(), 401);
    Ok(())
}

#[tokio::test]
async fn logout_revokes_and_is_idempotent() -> Result<()> {
    let server = TestServer::start().await?;

    let login: Value = server
        .post(
            "/api/Login/login",
            &json!({"userName": "prashant", "password": "1234"}),
        )
        .await?
        .json()
        .await?;
    let refresh_token = login["refreshToken"].as_str().unwrap().to_string();

    let response = server
        .post("/api/Login/logout", &json!({"refreshToken": refresh_token}))
        .await?;
    assert_eq!(response.status(), 200);

    // Double logout still succeeds
    let response = server
        .post("/api/Login/logout", &json!({"refreshToken": refresh_token}))
        .await?;
    assert_eq!(response.status(), 200);

    // The revoked token no longer refreshes
    let response = server
        .post("/api/Login/refresh", &json!({"refreshToken": refresh_token}))
        .await?;
    assert_eq!(response.status(), 401);

    // A token the server never issued is rejected
    let response = server
        .post("/api/Login/logout", &json!({"refreshToken": "never-issued"}))
        .await?;
    assert_eq!(response.status(), 401);
    Ok(())
}

#[tokio::test]
async fn me_requires_a_valid_bearer_token() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/api/Login/me").await?;
    assert_eq!(response.status(), 401);

    let response = server.get_auth("/api/Login/me", "not-a-token").await?;
    assert_eq!(response.status(), 401);

    let login: Value = server
        .post(
            "/api/Login/login",
            &json!({"userName": "prashant", "password": "1234"}),
        )
        .await?
        .json()
        .await?;
    let access_token = login["accessToken"].as_str().unwrap();

    let response = server.get_auth("/api/Login/me", access_token).await?;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await?;
    assert_eq!(body["userId"], 1);
    assert_eq!(body["username"], "prashant");
    assert_eq!(body["role"], "Admin");
    Ok(())
}
