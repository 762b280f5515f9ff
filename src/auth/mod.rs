//! Authentication module
//!
//! The forum API authenticates every call with a static bearer token
//! supplied through configuration. Token issuance and refresh happen
//! outside this crate.

mod types;

pub use types::AuthConfig;
