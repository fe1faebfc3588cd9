use thiserror::Error;

/// Errors raised by the organizer console itself
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
