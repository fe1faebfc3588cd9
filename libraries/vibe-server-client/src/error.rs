//! Error types for the VibeQueue server client.

use thiserror::Error;

/// Errors that can occur when talking to the VibeQueue backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Server answered 2xx but the envelope reported failure
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials or expired token)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
