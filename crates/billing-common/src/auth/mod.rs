//! Authentication primitives - token codec and password verification

mod jwt;
mod password;
mod refresh;

pub use jwt::{AccessClaims, IssuedAccessToken, JwtService};
pub use password::{hash_password, verify_password, Argon2Verifier};
pub use refresh::generate_refresh_token;
