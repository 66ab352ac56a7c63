//! Client error types

use backoffice_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error, including timeouts
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed (HTTP 401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Backend reported an application-level failure inside a 2xx response
    #[error("Backend error {code}: {message}")]
    Api { code: String, message: String },

    /// Token refresh failed; the session has been torn down
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// A 2xx envelope arrived without the payload the caller required
    #[error("Response contained no data")]
    MissingData,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Session store failure
    #[error("Session store error: {0}")]
    Store(#[from] CoreError),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether this is the transport-level 401 that triggers a refresh
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the session was torn down by a failed refresh
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }
}
