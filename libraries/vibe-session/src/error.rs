use thiserror::Error;

/// Errors surfaced by event session operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The request is not where the operation expected it. The local
    /// view went stale between the caller's look and the call; nothing
    /// was mutated.
    #[error("Stale state: {0}")]
    Stale(String),

    /// The remote authority refused or could not be reached. Nothing
    /// was mutated.
    #[error("Server call failed: {0}")]
    Authority(#[from] vibe_server_client::ClientError),

    /// The queue hub subscription could not be established.
    #[error("Queue hub error: {0}")]
    Hub(#[from] vibe_queue_hub::HubError),

    /// The session was already closed.
    #[error("Event session is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, SessionError>;
