/// Song request domain type and its lifecycle
use super::RequestId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a song request as seen by this client.
///
/// Exactly one state holds at any time. `Queued` requests sit in the
/// queue awaiting a decision, `Accepted` and `Playing` requests live on
/// the playlist, and `Rejected`/`Finished` requests are terminal and
/// live in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Awaiting an accept/reject decision
    Queued,
    /// Accepted onto the play queue
    Accepted,
    /// Currently being played (display state within the playlist)
    Playing,
    /// Rejected by the organizer
    Rejected,
    /// Finished playing
    Finished,
}

impl LifecycleState {
    /// Whether this state is terminal (the request lives in history).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Finished)
    }

    /// Map the backend's history `State` code to a terminal state.
    ///
    /// The API encodes finished playback as `1`; every other code on a
    /// history row means the request was rejected.
    pub fn from_history_code(code: i64) -> Self {
        if code == 1 {
            Self::Finished
        } else {
            Self::Rejected
        }
    }
}

/// One submitted song request tied to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRequest {
    /// Unique identifier, stable for the lifetime of the request
    pub id: RequestId,

    /// Song title, immutable after creation
    pub title: String,

    /// Artist name, immutable after creation
    pub artist: String,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Vote count; authoritative increments come from the server, this
    /// client only displays the latest known value
    pub likes: i64,

    /// Current lifecycle state
    pub state: LifecycleState,

    /// Set when the request enters history, absent otherwise
    pub timestamp: Option<DateTime<Utc>>,
}

impl SongRequest {
    /// Create a freshly queued request (e.g. from a queue hub push).
    pub fn new(id: RequestId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            image_url: None,
            likes: 0,
            state: LifecycleState::Queued,
            timestamp: None,
        }
    }

    /// Builder-style image URL
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builder-style vote count
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = likes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_starts_queued() {
        let req = SongRequest::new(RequestId::new("1"), "Title", "Artist");
        assert_eq!(req.state, LifecycleState::Queued);
        assert!(req.timestamp.is_none());
    }

    #[test]
    fn history_code_one_is_finished() {
        assert_eq!(LifecycleState::from_history_code(1), LifecycleState::Finished);
    }

    #[test]
    fn other_history_codes_are_rejected() {
        assert_eq!(LifecycleState::from_history_code(0), LifecycleState::Rejected);
        assert_eq!(LifecycleState::from_history_code(2), LifecycleState::Rejected);
    }

    #[test]
    fn terminal_states() {
        assert!(LifecycleState::Rejected.is_terminal());
        assert!(LifecycleState::Finished.is_terminal());
        assert!(!LifecycleState::Queued.is_terminal());
        assert!(!LifecycleState::Accepted.is_terminal());
        assert!(!LifecycleState::Playing.is_terminal());
    }
}
