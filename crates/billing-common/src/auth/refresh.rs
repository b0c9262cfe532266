//! Opaque refresh-token generation
//!
//! Refresh tokens carry no embedded claims; all of their state lives in the
//! token store.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes per token (256 bits of entropy)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random, URL-safe refresh token value.
#[must_use]
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
