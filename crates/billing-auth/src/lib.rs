//! # billing-auth
//!
//! Application layer: the session authenticator (login, refresh-with-rotation,
//! logout) and the wire DTOs for the login API.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{LoginRequest, LoginResponse, RefreshRequest, SessionUserResponse};
pub use services::AuthService;
