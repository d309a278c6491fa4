//! Client error types

use shared::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource or route not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Route exists but does not accept the method
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured error returned by the API
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The endpoint is unavailable on this backend (HTTP 404 / 405).
    ///
    /// Used by the piece filter to fall back to listing every piece.
    pub fn is_route_missing(&self) -> bool {
        match self {
            ClientError::NotFound(_) | ClientError::MethodNotAllowed(_) => true,
            ClientError::Api { status, .. } => matches!(status, 404 | 405),
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Unauthorized(_) => true,
            ClientError::Api { status, .. } => *status == 401,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
