//! # billing-client
//!
//! Outbound HTTP plumbing shared by every API caller: a single [`ApiClient`]
//! instance owns the connection pool, attaches bearer tokens, marshals JSON,
//! and retries transient failures with exponential backoff. [`AuthApi`] is
//! the remote face of the session authenticator built on top of it.

mod auth_api;
mod client;
mod error;
mod transport;

pub use auth_api::AuthApi;
pub use client::{ApiClient, RetryPolicy};
pub use error::ClientError;
pub use transport::{
    HttpTransport, Method, Transport, TransportError, TransportRequest, TransportResponse,
};
