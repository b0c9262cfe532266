//! Remote face of the session authenticator
//!
//! Talks to the login endpoints through the resilient client and translates
//! HTTP statuses back into the authentication taxonomy.

use billing_core::{Session, SessionUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Client for the `/api/Login` endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Wrap an existing client (sharing its connection pool)
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in with username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginRequestWire {
            user_name: username,
            password,
            log_in_time: Some(Utc::now()),
        };
        let response: LoginResponseWire = self
            .client
            .post("/api/Login/login", Some(&body), &[], None)
            .await
            .map_err(map_auth_status)?;
        response.into_session()
    }

    /// Exchange a refresh token for a rotated session
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, ClientError> {
        let body = RefreshRequestWire { refresh_token };
        let response: LoginResponseWire = self
            .client
            .post("/api/Login/refresh", Some(&body), &[], None)
            .await
            .map_err(map_auth_status)?;
        response.into_session()
    }

    /// Revoke a refresh token
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ClientError> {
        let body = RefreshRequestWire { refresh_token };
        self.client
            .post_no_content("/api/Login/logout", Some(&body), &[], None)
            .await
            .map_err(map_auth_status)
    }

    /// Fetch the user summary behind an access token
    pub async fn current_user(&self, access_token: &str) -> Result<SessionUser, ClientError> {
        let user: SessionUserWire = self
            .client
            .get("/api/Login/me", &[], Some(access_token))
            .await
            .map_err(map_auth_status)?;
        Ok(user.into())
    }
}

/// Map the login endpoints' documented statuses into the taxonomy
fn map_auth_status(err: ClientError) -> ClientError {
    match err {
        ClientError::RequestFailed { status: 401, .. } => ClientError::Unauthorized,
        ClientError::RequestFailed { status: 400, body } => {
            ClientError::InvalidInput(extract_message(&body))
        }
        other => other,
    }
}

/// Pull the `message` field out of an error body, falling back to the raw text
fn extract_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct MessageBody {
        message: String,
    }
    serde_json::from_str::<MessageBody>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.to_string())
}

// Wire types for the login API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequestWire<'a> {
    user_name: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_in_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequestWire<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionUserWire {
    user_id: i64,
    username: String,
    role: String,
}

impl From<SessionUserWire> for SessionUser {
    fn from(wire: SessionUserWire) -> Self {
        Self {
            user_id: wire.user_id,
            username: wire.username,
            role: wire.role,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponseWire {
    success: bool,
    access_token: String,
    access_token_expiry: DateTime<Utc>,
    refresh_token: String,
    refresh_token_expiry: DateTime<Utc>,
    user: SessionUserWire,
}

impl LoginResponseWire {
    fn into_session(self) -> Result<Session, ClientError> {
        if !self.success {
            return Err(ClientError::Decode(
                "login response marked unsuccessful".to_string(),
            ));
        }
        Ok(Session {
            access_token: self.access_token,
            access_token_expires_at: self.access_token_expiry,
            refresh_token: self.refresh_token,
            refresh_token_expires_at: self.refresh_token_expiry,
            user: self.user.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RetryPolicy;
    use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl ScriptedTransport {
        fn new(
            script: impl IntoIterator<Item = Result<TransportResponse, TransportError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted transport ran out of responses")
        }
    }

    fn api(transport: Arc<ScriptedTransport>) -> AuthApi {
        AuthApi::new(ApiClient::with_transport(
            transport,
            "http://api.test",
            RetryPolicy::default(),
        ))
    }

    const LOGIN_OK: &str = r#"{
        "success": true,
        "accessToken": "acc-token",
        "accessTokenExpiry": "2099-01-01T00:15:00Z",
        "refreshToken": "ref-token",
        "refreshTokenExpiry": "2099-01-08T00:00:00Z",
        "user": {"userId": 1, "username": "prashant", "role": "Admin"}
    }"#;

    #[tokio::test]
    async fn test_login_success_maps_to_session() {
        let transport = ScriptedTransport::new([Ok(TransportResponse {
            status: 200,
            body: LOGIN_OK.to_string(),
        })]);
        let api = api(Arc::clone(&transport));

        let session = api.login("prashant", "1234").await.unwrap();
        assert_eq!(session.access_token, "acc-token");
        assert_eq!(session.refresh_token, "ref-token");
        assert_eq!(session.user.user_id, 1);
        assert_eq!(session.user.role, "Admin");

        let sent = transport.requests.lock().unwrap().clone();
        assert_eq!(sent[0].url, "http://api.test/api/Login/login");
        let body: serde_json::Value = serde_json::from_slice(sent[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["userName"], "prashant");
        assert_eq!(body["password"], "1234");
    }

    #[tokio::test]
    async fn test_login_401_maps_to_unauthorized() {
        let transport = ScriptedTransport::new([Ok(TransportResponse {
            status: 401,
            body: r#"{"message":"Invalid credentials"}"#.to_string(),
        })]);
        let api = api(transport);

        let result = api.login("prashant", "wrong").await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_400_maps_to_invalid_input_with_message() {
        let transport = ScriptedTransport::new([Ok(TransportResponse {
            status: 400,
            body: r#"{"message":"Invalid input: username and password are required"}"#.to_string(),
        })]);
        let api = api(transport);

        let result = api.login("", "").await;
        match result {
            Err(ClientError::InvalidInput(msg)) => {
                assert!(msg.contains("username and password are required"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_hits_refresh_endpoint() {
        let transport = ScriptedTransport::new([Ok(TransportResponse {
            status: 200,
            body: LOGIN_OK.to_string(),
        })]);
        let api = api(Arc::clone(&transport));

        api.refresh("old-token").await.unwrap();

        let sent = transport.requests.lock().unwrap().clone();
        assert_eq!(sent[0].url, "http://api.test/api/Login/refresh");
        let body: serde_json::Value = serde_json::from_slice(sent[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["refreshToken"], "old-token");
    }

    #[tokio::test]
    async fn test_logout_accepts_empty_body() {
        let transport = ScriptedTransport::new([Ok(TransportResponse {
            status: 200,
            body: String::new(),
        })]);
        let api = api(transport);

        api.logout("ref-token").await.unwrap();
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer() {
        let transport = ScriptedTransport::new([Ok(TransportResponse {
            status: 200,
            body: r#"{"userId": 1, "username": "prashant", "role": "Admin"}"#.to_string(),
        })]);
        let api = api(Arc::clone(&transport));

        let user = api.current_user("acc-token").await.unwrap();
        assert_eq!(user.username, "prashant");

        let sent = transport.requests.lock().unwrap().clone();
        assert_eq!(sent[0].bearer.as_deref(), Some("acc-token"));
        assert_eq!(sent[0].url, "http://api.test/api/Login/me");
    }

    #[tokio::test]
    async fn test_transient_failure_not_mistaken_for_bad_password() {
        let transport = ScriptedTransport::new([
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
        ]);
        let api = AuthApi::new(ApiClient::with_transport(
            transport,
            "http://api.test",
            RetryPolicy::new(3, std::time::Duration::from_millis(1)),
        ));

        let result = api.login("prashant", "1234").await;
        assert!(matches!(result, Err(ClientError::Transient { .. })));
    }
}
