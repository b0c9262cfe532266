//! Wire DTOs for the login API
//!
//! Field names follow the published JSON interface (`userName`,
//! `accessTokenExpiry`, ...), so everything is camelCase on the wire.

mod mappers;
mod requests;
mod responses;

pub use requests::{LoginRequest, RefreshRequest};
pub use responses::{LoginResponse, SessionUserResponse};
