//! Resilient JSON API client
//!
//! One `ApiClient` instance per process (or per test) owns the transport;
//! `Clone` shares it. Backoff suspends only the logical call in flight -
//! concurrent calls on clones of the same client are unaffected, and
//! dropping a call's future cancels its pending retry timer.

use std::sync::Arc;
use std::time::Duration;

use billing_common::HttpClientConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::transport::{HttpTransport, Method, Transport, TransportRequest, TransportResponse};

/// Exponential backoff schedule for transient failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one
    pub base_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before the given retry (1-based): `base * 2^(retry - 1)`
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Shared JSON API client.
///
/// Clone is cheap - the transport is behind an `Arc` and (for
/// [`HttpTransport`]) shares one connection pool across all clones.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Build a client over the production HTTP transport
    ///
    /// # Errors
    /// Returns an error if the transport cannot be constructed
    pub fn from_config(config: &HttpClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))
            .map_err(ClientError::Transport)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.base_url.clone(),
            RetryPolicy::new(
                config.retry_max_attempts,
                Duration::from_millis(config.retry_base_delay_ms),
            ),
        ))
    }

    /// Build a client over any transport (the seam used by tests)
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<T, ClientError> {
        let response = self.execute(Method::Get, path, None, query, bearer).await?;
        Self::decode(&response)
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<T, ClientError> {
        let body = Self::encode(body)?;
        let response = self.execute(Method::Post, path, body, query, bearer).await?;
        Self::decode(&response)
    }

    /// POST a JSON body, expecting a 2xx response with no meaningful body
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<(), ClientError> {
        let body = Self::encode(body)?;
        self.execute(Method::Post, path, body, query, bearer)
            .await?;
        Ok(())
    }

    fn encode<B: Serialize + ?Sized>(body: Option<&B>) -> Result<Option<Vec<u8>>, ClientError> {
        body.map(|b| serde_json::to_vec(b).map_err(|e| ClientError::Encode(e.to_string())))
            .transpose()
    }

    fn decode<T: DeserializeOwned>(response: &TransportResponse) -> Result<T, ClientError> {
        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ClientError> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }

    /// Send with retry; returns the first successful (2xx) response.
    ///
    /// Per-call state machine: each attempt either succeeds, fails terminally
    /// (any HTTP response, or a non-transient transport error), or schedules
    /// a retry after `base * 2^(n-1)`.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<TransportResponse, ClientError> {
        let url = self.build_url(path, query)?;
        let mut retries = 0u32;

        loop {
            debug!(method = %method, url = %url, attempt = retries + 1, "sending request");

            let request = TransportRequest {
                method,
                url: url.clone(),
                body: body.clone(),
                bearer: bearer.map(str::to_string),
            };

            match self.transport.send(request).await {
                Ok(response) => {
                    debug!(
                        method = %method,
                        url = %url,
                        status = response.status,
                        "received response"
                    );
                    if response.is_success() {
                        return Ok(response);
                    }
                    // Any well-formed HTTP response is terminal
                    return Err(ClientError::RequestFailed {
                        status: response.status,
                        body: response.body,
                    });
                }
                Err(e) if e.is_transient() && retries < self.retry.max_retries => {
                    retries += 1;
                    let delay = self.retry.delay_for(retries);
                    warn!(
                        method = %method,
                        url = %url,
                        attempt = retries,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient failure; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_transient() => {
                    return Err(ClientError::Transient {
                        attempts: retries + 1,
                        source: e,
                    });
                }
                Err(e) => return Err(ClientError::Transport(e)),
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
