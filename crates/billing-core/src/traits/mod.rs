//! Ports - traits the infrastructure layer implements

mod ports;

pub use ports::{CredentialVerifier, RevokeOutcome, RotateOutcome, TokenStore, UserDirectory};
