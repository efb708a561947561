//! Error types for the Sprout API client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Shown whenever the server rejects the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Errors surfaced by the API client and the stores built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the server, or no session token available
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    Unauthorized,

    /// 404 for the requested resource
    #[error("{message}")]
    NotFound { message: String },

    /// 400/422 rejection of the submitted data
    #[error("{message}")]
    Validation { status: u16, message: String },

    /// Client-side deadline elapsed
    #[error("The request to {operation} timed out. Check your connection and try again.")]
    Timeout { operation: String },

    /// Any other non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connection refused, DNS failure and similar transport errors
    #[error("Unable to reach the server: {0}")]
    Network(String),

    /// 2xx body that does not match the expected shape
    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    /// Session provider failure
    #[error("Session error: {0}")]
    Session(String),

    /// Input rejected locally before any request was sent
    #[error(transparent)]
    Domain(#[from] sprout_core::Error),
}

impl ApiError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn validation(status: u16, message: impl Into<String>) -> Self {
        Self::Validation {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// The caller should send the user back to the login flow.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// HTTP status behind the error, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { status, .. } | ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a banner or form error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Domain(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
