//! Authentication credentials for the CEX.io API
//!
//! CEX.io signs private calls with HMAC-SHA256 over
//! `nonce + username + api_key`, keyed by the API secret, and sends the
//! digest as uppercase hex alongside the key and nonce.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// Account username (part of the signed message)
    username: String,
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials
    ///
    /// # Errors
    /// [`AuthError::InvalidCredentials`] if any component is empty.
    pub fn new(
        username: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> AuthResult<Self> {
        let username = username.into();
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if username.is_empty() || api_key.is_empty() || api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "username, api key, and api secret must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            username,
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `CEX_USERNAME`, `CEX_API_KEY`, and `CEX_API_SECRET`.
    pub fn from_env() -> AuthResult<Self> {
        let username = std::env::var("CEX_USERNAME")
            .map_err(|_| AuthError::EnvVarNotSet("CEX_USERNAME".to_string()))?;
        let api_key = std::env::var("CEX_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("CEX_API_KEY".to_string()))?;
        let api_secret = std::env::var("CEX_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("CEX_API_SECRET".to_string()))?;

        Self::new(username, api_key, api_secret)
    }

    /// Get the account username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a private request for the given nonce
    ///
    /// Returns `HMAC-SHA256(nonce + username + api_key, api_secret)` as an
    /// uppercase hex string.
    pub fn sign(&self, nonce: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(nonce.as_bytes());
        mac.update(self.username.as_bytes());
        mac.update(self.api_key.as_bytes());
        hex::encode_upper(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..4.min(self.api_key.len())]),
            )
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("up000001", "test_api_key", "test_api_secret").unwrap()
    }

    #[test]
    fn test_rejects_empty_components() {
        assert!(Credentials::new("", "key", "secret").is_err());
        assert!(Credentials::new("user", "", "secret").is_err());
        assert!(Credentials::new("user", "key", "").is_err());
    }

    #[test]
    fn test_signature_is_uppercase_hex() {
        let signature = creds().sign("1616492376594");
        // SHA256 produces 32 bytes = 64 hex characters
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_signature_is_deterministic() {
        assert_eq!(creds().sign("100"), creds().sign("100"));
        assert_ne!(creds().sign("100"), creds().sign("101"));
    }

    #[test]
    fn test_different_secrets_differ() {
        let a = Credentials::new("user", "key", "secret1").unwrap();
        let b = Credentials::new("user", "key", "secret2").unwrap();
        assert_ne!(a.sign("100"), b.sign("100"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", creds());
        assert!(!debug.contains("test_api_secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
