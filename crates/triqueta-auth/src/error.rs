//! Authentication error types.

use thiserror::Error;
use triqueta_config_and_utils::CoreError;
use triqueta_storage::StorageError;

/// Why a token refresh did not produce a new credential pair.
///
/// Cloneable so every caller waiting on the same in-flight refresh receives
/// the same outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshFailure {
    /// Nothing to refresh with; no request was made.
    #[error("no refresh token stored")]
    MissingRefreshToken,

    /// The server answered the refresh with a non-success status.
    #[error("refresh rejected with HTTP {0}")]
    Rejected(u16),

    /// The refresh request never produced a response.
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// The refresh response could not be decoded.
    #[error("invalid refresh response: {0}")]
    InvalidResponse(String),

    /// The new pair could not be read or written.
    #[error("credential storage failed: {0}")]
    Storage(String),
}

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login rejected by the server
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Recovery from a 401 failed; stored credentials have been cleared
    #[error("Session expired: {0}")]
    SessionExpired(#[from] RefreshFailure),

    /// Operation requires stored credentials and there are none
    #[error("Not logged in")]
    NotLoggedIn,

    /// Stored access token cannot be sent as a header value
    #[error("Stored access token is malformed")]
    MalformedToken,

    /// Non-success response from an endpoint handled by this crate
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Invalid state transition in the request FSM
    #[error("Invalid request state transition: {0}")]
    InvalidStateTransition(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the server
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),
}

impl AuthError {
    /// Returns true if this error is transient and the operation can be retried.
    ///
    /// Transient errors include:
    /// - Network unavailable
    /// - Timeouts
    /// - HTTP errors with 5xx status codes
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::NetworkUnavailable(_) => true,
            AuthError::Timeout => true,
            AuthError::UnexpectedStatus { status, .. } => *status >= 500,
            AuthError::Http(e) => {
                if e.is_connect() || e.is_timeout() {
                    return true;
                }
                if let Some(status) = e.status() {
                    return status.is_server_error();
                }
                false
            }
            _ => false,
        }
    }

    /// Returns true if the user has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, AuthError::SessionExpired(_) | AuthError::NotLoggedIn)
    }
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transient_network_unavailable() {
        assert!(AuthError::NetworkUnavailable("connection refused".into()).is_transient());
    }

    #[test]
    fn test_is_transient_timeout() {
        assert!(AuthError::Timeout.is_transient());
    }

    #[test]
    fn test_is_transient_server_error_status() {
        let err = AuthError::UnexpectedStatus {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_is_not_transient_invalid_credentials() {
        assert!(!AuthError::InvalidCredentials("bad password".to_string()).is_transient());
    }

    #[test]
    fn test_session_expired_requires_login() {
        let err = AuthError::from(RefreshFailure::MissingRefreshToken);
        assert!(err.requires_login());
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "Session expired: no refresh token stored");
    }
}
