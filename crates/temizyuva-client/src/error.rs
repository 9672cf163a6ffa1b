//! Error types for the admin backend client

use std::io;
use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection, timeout, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status other than 401
    #[error("Backend returned {status} for {method} {path}{}", detail(.message.as_deref()))]
    Status {
        /// HTTP status code
        status: u16,
        /// Request method
        method: String,
        /// Request path relative to the base URL
        path: String,
        /// Message from the response body, if any
        message: Option<String>,
    },

    /// The backend rejected the bearer token; the session has been destroyed
    #[error("Session rejected by backend, please log in again")]
    Unauthorized,

    /// Login was refused
    #[error("Login failed: {message}")]
    LoginFailed {
        /// Reason reported by the backend
        message: String,
    },

    /// Token could not be decoded
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// What was wrong with it
        reason: String,
    },

    /// Token store failure
    #[error("Token store error: {message}")]
    Store {
        /// Error message
        message: String,
    },

    /// Envelope, validation or configuration error from the core crate
    #[error(transparent)]
    Core(#[from] temizyuva_core::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn detail(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl ClientError {
    /// Create a status error
    pub fn status(
        status: u16,
        method: impl Into<String>,
        path: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self::Status {
            status,
            method: method.into(),
            path: path.into(),
            message,
        }
    }

    /// Create a login failure
    pub fn login_failed(message: impl Into<String>) -> Self {
        Self::LoginFailed {
            message: message.into(),
        }
    }

    /// Create an invalid token error
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// Create a token store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Whether the error means the user has to log in again
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::InvalidToken { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_message() {
        let err = ClientError::status(404, "GET", "/admin/services/9", Some("Hizmet bulunamadı".into()));
        assert_eq!(
            err.to_string(),
            "Backend returned 404 for GET /admin/services/9: Hizmet bulunamadı"
        );

        let err = ClientError::status(500, "POST", "/Blog", None);
        assert_eq!(err.to_string(), "Backend returned 500 for POST /Blog");
    }

    #[test]
    fn test_requires_login() {
        assert!(ClientError::Unauthorized.requires_login());
        assert!(ClientError::invalid_token("bad").requires_login());
        assert!(!ClientError::login_failed("nope").requires_login());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err = ClientError::from(temizyuva_core::Error::api("Yetkiniz yok"));
        assert_eq!(err.to_string(), "Request rejected by backend: Yetkiniz yok");
    }
}
