//! # billing-store
//!
//! In-memory reference implementations of the `billing-core` storage ports.
//! Production deployments swap these for database-backed implementations of
//! the same traits; everything in `billing-auth` is agnostic to the choice.

mod disabled;
mod token_store;
mod user_directory;

pub use disabled::DisabledTokenStore;
pub use token_store::MemoryTokenStore;
pub use user_directory::MemoryUserDirectory;
