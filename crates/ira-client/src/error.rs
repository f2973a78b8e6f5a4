//! Error types for the Ira client.
//!
//! [`IraError`] covers the whole credential lifecycle and chat protocol. Callers that face an end
//! user render it through `Display`; no terminal styling is embedded in the values.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from credential loading/refresh and chat requests.
#[derive(Error, Debug)]
pub enum IraError {
    #[error("Credentials file not found: {}", path.display())]
    CredentialMissing { path: PathBuf },

    #[error("Credentials file {} is corrupted: {reason}", path.display())]
    CredentialCorrupt { path: PathBuf, reason: String },

    #[error("Missing required key '{field}' in credentials")]
    CredentialIncomplete { field: &'static str },

    #[error("Error {message}: make sure the API key and refresh token are valid")]
    InvalidGrant { message: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Authentication failed after {attempts} attempt(s): {reason}")]
    AuthUnrecoverable { attempts: u32, reason: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl IraError {
    /// True for the local credential-file failures that are recovered by a refresh.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            IraError::CredentialMissing { .. }
                | IraError::CredentialCorrupt { .. }
                | IraError::CredentialIncomplete { .. }
        )
    }
}

/// Result type for client operations; uses [`IraError`].
pub type Result<T> = std::result::Result<T, IraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_classified() {
        assert!(IraError::CredentialMissing { path: "IraAI.json".into() }.is_credential_error());
        assert!(IraError::CredentialIncomplete { field: "user_id" }.is_credential_error());
        assert!(!IraError::TokenExpired.is_credential_error());
        assert!(!IraError::InvalidGrant { message: "invalid_grant".into() }.is_credential_error());
    }

    #[test]
    fn test_upstream_display_carries_status_and_body() {
        let err = IraError::Upstream {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Error 500: boom");
    }
}
