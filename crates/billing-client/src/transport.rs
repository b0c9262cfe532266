//! Transport seam under the resilient client
//!
//! [`HttpTransport`] is the production implementation over a shared
//! `reqwest::Client`; tests substitute scripted transports to drive the
//! retry machinery deterministically.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP method subset used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built outbound request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Final URL including query parameters
    pub url: String,
    /// JSON body bytes, if any
    pub body: Option<Vec<u8>>,
    /// Bearer token for the Authorization header, if any
    pub bearer: Option<String>,
}

/// Raw response from a completed attempt
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP layer - no response was obtained
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether a retry is expected to help.
    ///
    /// Timeouts and connection failures are transient; anything else only
    /// counts when its message mentions a timeout (some stacks report
    /// mid-body timeouts as generic errors).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Connect(_) => true,
            Self::Other(msg) => msg.contains("timeout"),
        }
    }
}

/// One attempt at delivering a request
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport over a shared `reqwest::Client`.
///
/// The inner client holds the connection pool; cloning shares it, and it is
/// safe for concurrent use without external locking.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a fixed per-attempt timeout
    ///
    /// # Errors
    /// Returns an error if the underlying client cannot be constructed
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    fn classify(err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|e| Self::classify(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Self::classify(&e))?;

        Ok(TransportResponse { status, body })
    }
}
