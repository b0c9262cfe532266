//! Session authentication service
//!
//! Orchestrates credential verification, token issuance, rotation, and
//! revocation over the injected ports. Every refresh rotates the refresh
//! token so a stolen token is spendable at most once; reuse of a retired
//! token is logged as a security-relevant event.

use std::sync::Arc;

use billing_core::{
    AuthError, AuthResult, Credentials, CredentialVerifier, RefreshTokenRecord, RevokeOutcome,
    RotateOutcome, Session, SessionUser, StoreError, TokenStore, User, UserDirectory,
};
use billing_common::{generate_refresh_token, JwtService};
use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};

/// Session authenticator
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    tokens: Arc<dyn TokenStore>,
    verifier: Arc<dyn CredentialVerifier>,
    jwt: Arc<JwtService>,
    refresh_token_days: i64,
}

impl AuthService {
    /// Create a new service over the injected ports
    pub fn new(
        users: Arc<dyn UserDirectory>,
        tokens: Arc<dyn TokenStore>,
        verifier: Arc<dyn CredentialVerifier>,
        jwt: Arc<JwtService>,
        refresh_token_days: i64,
    ) -> Self {
        Self {
            users,
            tokens,
            verifier,
            jwt,
            refresh_token_days,
        }
    }

    /// Authenticate credentials and open a session
    ///
    /// # Errors
    /// `InvalidInput` for blank credentials; `Unauthorized` for any mismatch,
    /// without disclosing which field was wrong.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> AuthResult<Session> {
        if !credentials.is_well_formed() {
            return Err(AuthError::invalid_input(
                "username and password are required",
            ));
        }

        let user = self
            .users
            .find_by_username(&credentials.username)
            .await
            .map_err(AuthError::internal)?
            .ok_or_else(|| {
                warn!("login failed: user not found");
                AuthError::Unauthorized
            })?;

        if !user.is_active() {
            warn!(user_id = user.user_id, "login failed: account inactive");
            return Err(AuthError::Unauthorized);
        }

        // Constant-time hash comparison inside the verifier
        let matches = self
            .verifier
            .verify(&credentials.password, &user.password_hash)?;
        if !matches {
            warn!(user_id = user.user_id, "login failed: verifier mismatch");
            return Err(AuthError::Unauthorized);
        }

        let session = self.open_session(&user).await?;
        info!(user_id = user.user_id, "user logged in");
        Ok(session)
    }

    /// Exchange a refresh token for a new session, rotating the token
    ///
    /// Rotation is atomic at the store: the presented token is revoked in
    /// the same operation that installs its successor, so of two concurrent
    /// refreshes exactly one succeeds.
    ///
    /// # Errors
    /// `InvalidInput` for a blank token; `Unauthorized` for an unknown,
    /// expired, or revoked one; `NotImplemented` when no store is wired.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<Session> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::invalid_input("refresh token is required"));
        }

        let record = self
            .tokens
            .find(refresh_token)
            .await
            .map_err(|e| match e {
                StoreError::Unavailable => AuthError::NotImplemented("refresh"),
                e => AuthError::internal(e),
            })?
            .ok_or_else(|| {
                debug!("refresh failed: unknown token");
                AuthError::Unauthorized
            })?;

        if record.is_revoked() {
            warn!(
                user_id = record.user_id,
                "revoked refresh token presented; possible replay"
            );
            return Err(AuthError::Unauthorized);
        }
        if record.is_expired() {
            debug!(user_id = record.user_id, "refresh failed: token expired");
            return Err(AuthError::Unauthorized);
        }

        // Resolve the account before rotating so a missing or deactivated
        // user does not burn the presented token.
        let user = self
            .users
            .find_by_id(record.user_id)
            .await
            .map_err(AuthError::internal)?
            .filter(User::is_active)
            .ok_or_else(|| {
                warn!(user_id = record.user_id, "refresh failed: account unavailable");
                AuthError::Unauthorized
            })?;

        let access = self.jwt.issue_access_token(&user)?;
        let successor = self.new_refresh_record(user.user_id);
        let successor_token = successor.token.clone();
        let successor_expiry = successor.expires_at;

        let outcome = self
            .tokens
            .rotate(refresh_token, successor)
            .await
            .map_err(|e| match e {
                StoreError::Unavailable => AuthError::NotImplemented("refresh"),
                e => AuthError::internal(e),
            })?;

        match outcome {
            RotateOutcome::Rotated(retired) => {
                info!(user_id = retired.user_id, "refresh token rotated");
                Ok(Session {
                    access_token: access.token,
                    access_token_expires_at: access.expires_at,
                    refresh_token: successor_token,
                    refresh_token_expires_at: successor_expiry,
                    user: SessionUser::from(&user),
                })
            }
            RotateOutcome::Revoked => {
                // Lost a race with a concurrent rotation, or a replay that
                // landed between our read and the store's check.
                warn!(
                    user_id = user.user_id,
                    "revoked refresh token presented; possible replay"
                );
                Err(AuthError::Unauthorized)
            }
            RotateOutcome::Missing | RotateOutcome::Expired => Err(AuthError::Unauthorized),
        }
    }

    /// Revoke a refresh token, ending its session
    ///
    /// Idempotent: revoking an already-revoked token succeeds. Only a token
    /// the store has never seen is rejected.
    ///
    /// # Errors
    /// `InvalidInput` for a blank token; `Unauthorized` for an unknown one;
    /// `NotImplemented` when no store is wired.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::invalid_input("refresh token is required"));
        }

        let outcome = self.tokens.revoke(refresh_token).await.map_err(|e| match e {
            StoreError::Unavailable => AuthError::NotImplemented("logout"),
            e => AuthError::internal(e),
        })?;

        match outcome {
            RevokeOutcome::Revoked => {
                info!("user logged out");
                Ok(())
            }
            RevokeOutcome::AlreadyRevoked => {
                debug!("logout of already-revoked token");
                Ok(())
            }
            RevokeOutcome::Missing => Err(AuthError::Unauthorized),
        }
    }

    /// Resolve the user summary behind a validated access token's subject
    ///
    /// # Errors
    /// `Unauthorized` if the account no longer exists or was deactivated
    /// after the token was issued.
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: i64) -> AuthResult<SessionUser> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(AuthError::internal)?
            .filter(User::is_active)
            .map(|user| SessionUser::from(&user))
            .ok_or(AuthError::Unauthorized)
    }

    /// Issue a fresh token pair for a verified user and persist the refresh half
    async fn open_session(&self, user: &User) -> AuthResult<Session> {
        let access = self.jwt.issue_access_token(user)?;
        let record = self.new_refresh_record(user.user_id);
        let refresh_token = record.token.clone();
        let refresh_expiry = record.expires_at;

        self.tokens
            .save(record)
            .await
            .map_err(AuthError::internal)?;

        Ok(Session {
            access_token: access.token,
            access_token_expires_at: access.expires_at,
            refresh_token,
            refresh_token_expires_at: refresh_expiry,
            user: SessionUser::from(user),
        })
    }

    fn new_refresh_record(&self, user_id: i64) -> RefreshTokenRecord {
        RefreshTokenRecord::new(
            generate_refresh_token(),
            user_id,
            Utc::now() + Duration::days(self.refresh_token_days),
        )
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("refresh_token_days", &self.refresh_token_days)
            .finish_non_exhaustive()
    }
}
