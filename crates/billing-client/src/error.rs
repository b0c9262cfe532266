//! Client-side error taxonomy

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by [`crate::ApiClient`] and [`crate::AuthApi`].
///
/// `Transient` is kept distinct from the authentication variants so callers
/// never mistake a network blip for a bad password.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request as malformed (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The server rejected the credentials or token (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// A non-2xx response that is not classified transient
    #[error("request failed with status {status}")]
    RequestFailed { status: u16, body: String },

    /// Transient transport failures exhausted the retry budget
    #[error("transient failure after {attempts} attempts: {source}")]
    Transient {
        attempts: u32,
        source: TransportError,
    },

    /// A non-transient transport failure (never retried)
    #[error("transport failure: {0}")]
    Transport(TransportError),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("failed to serialize request body: {0}")]
    Encode(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether this is a terminal transient failure (retries were exhausted)
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
