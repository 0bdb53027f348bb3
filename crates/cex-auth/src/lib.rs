//! Credentials and request signing for the CEX.io REST API
//!
//! Private endpoints expect each request to carry the API key, a strictly
//! increasing nonce, and an HMAC-SHA256 signature of
//! `nonce + username + api_key` in uppercase hex. This crate owns the
//! credential storage and the signing rule; the nonce counter itself is
//! per-client state and lives with the HTTP client.
//!
//! # Example
//!
//! ```
//! use cex_auth::Credentials;
//!
//! let creds = Credentials::new("up000001", "api_key", "api_secret")?;
//! let signature = creds.sign("1616492376594");
//! assert_eq!(signature.len(), 64);
//! # Ok::<(), cex_auth::AuthError>(())
//! ```

mod credentials;
mod error;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
