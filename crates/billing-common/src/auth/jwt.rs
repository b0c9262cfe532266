//! JWT access-token codec
//!
//! Issues and validates signed access tokens using the `jsonwebtoken` crate.
//! Validation is stateless: signature, structure, expiry, issuer, and
//! audience only - revocation is a token-store concern for refresh tokens,
//! and access tokens are intentionally not revocable (short lifetime is the
//! mitigation).

use billing_core::{AuthError, User};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Role name carried for authorization at the boundary
    pub role: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Get the user ID from the subject claim
    ///
    /// # Errors
    /// Returns `Unauthorized` if the subject is not a numeric id
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse::<i64>().map_err(|_| AuthError::Unauthorized)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// A freshly issued access token with its expiry instant
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Codec for issuing and validating access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    access_token_minutes: i64,
}

impl JwtService {
    /// Create a new codec with the given secret, issuer/audience pair, and
    /// access-token lifetime in minutes
    #[must_use]
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        access_token_minutes: i64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_minutes,
        }
    }

    /// Issue an access token for a user
    ///
    /// The encoded expiry is issue time + the configured lifetime; validity
    /// is determined purely by signature and expiry, never looked up.
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, user: &User) -> Result<IssuedAccessToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.access_token_minutes);

        let claims = AccessClaims {
            sub: user.user_id.to_string(),
            role: user.role.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("failed to encode access token: {e}")))?;

        // Re-derive the expiry from the encoded epoch seconds so the returned
        // instant matches the claim exactly.
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or(expires_at);

        Ok(IssuedAccessToken { token, expires_at })
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// Returns `Unauthorized` if the signature, structure, expiry, issuer,
    /// or audience check fails
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        tracing::debug!("access token expired");
                    }
                    kind => {
                        tracing::debug!(?kind, "access token rejected");
                    }
                }
                AuthError::Unauthorized
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_minutes", &self.access_token_minutes)
            .finish_non_exhaustive()
    }
}
