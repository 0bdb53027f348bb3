//! Error types for the CEX.io SDK

use thiserror::Error;

/// Main error type for CEX.io SDK operations
#[derive(Error, Debug)]
pub enum CexError {
    /// The remote transaction source reported an error string.
    ///
    /// Surfaced synchronously from the advance/restart call that triggered
    /// the fetch; the SDK does not retry. Retry policy belongs to the caller.
    #[error("API error: {message}")]
    RemoteFetch { message: String },

    /// A transaction's raw type is outside the closed set the
    /// classification rule understands.
    #[error("unknown transaction type: {raw}")]
    UnknownTransactionType { raw: String },

    /// Transport-level failure (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// Failed to encode a request or decode a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A private endpoint was called on a client built without credentials.
    #[error("credentials required for private endpoint: {endpoint}")]
    MissingCredentials { endpoint: String },
}

impl CexError {
    /// Create a [`CexError::RemoteFetch`] from the remote's error string
    pub fn remote_fetch(message: impl Into<String>) -> Self {
        Self::RemoteFetch {
            message: message.into(),
        }
    }

    /// Create a [`CexError::UnknownTransactionType`] for a raw type value
    pub fn unknown_transaction_type(raw: impl Into<String>) -> Self {
        Self::UnknownTransactionType { raw: raw.into() }
    }

    /// Create a [`CexError::Transport`] from any displayable source
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create a [`CexError::Parse`] from any displayable source
    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }

    /// Returns true if the remote itself rejected the request
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteFetch { .. })
    }
}

/// Result type alias for CEX.io SDK operations
pub type CexResult<T> = Result<T, CexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_fetch_display() {
        let err = CexError::remote_fetch("Invalid API key");
        assert_eq!(err.to_string(), "API error: Invalid API key");
        assert!(err.is_remote());
    }

    #[test]
    fn test_unknown_type_display() {
        let err = CexError::unknown_transaction_type("teleport");
        assert!(err.to_string().contains("teleport"));
        assert!(!err.is_remote());
    }
}
