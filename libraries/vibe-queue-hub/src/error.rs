//! Error types for the queue hub client.

use thiserror::Error;

/// Errors that can occur when working with the queue hub.
#[derive(Debug, Error)]
pub enum HubError {
    /// Failed to establish the initial hub connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A protocol-level error on an already-established connection.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result type for queue hub operations.
pub type Result<T> = std::result::Result<T, HubError>;
