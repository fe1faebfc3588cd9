//! Wire frames exchanged with the queue hub.
//!
//! Frames are JSON text messages tagged with a `type` field. The song
//! payload inside `SongEnteredQueue` arrives either as an inline object
//! or, matching the backend's envelope habit, as a JSON-encoded string.

use serde::{Deserialize, Deserializer, Serialize};
use vibe_core::wire::string_or_number;
use vibe_core::{RequestId, SongRequest};

/// Frames sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClientFrame {
    /// Join the delivery group for one event.
    JoinEventGroup {
        #[serde(rename = "eventId")]
        event_id: String,
    },
    /// Leave the delivery group for one event.
    LeaveEventGroup {
        #[serde(rename = "eventId")]
        event_id: String,
    },
}

/// Frames pushed by the hub.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ServerFrame {
    /// A new request entered the event's queue.
    SongEnteredQueue {
        #[serde(deserialize_with = "song_payload")]
        payload: IncomingSong,
    },
}

/// A newly submitted song request as delivered by the hub.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IncomingSong {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "SongName")]
    pub song_name: String,
    #[serde(rename = "ArtistName")]
    pub artist_name: String,
    #[serde(rename = "Votes", default)]
    pub votes: i64,
    #[serde(rename = "ImageUrl", default)]
    pub image_url: Option<String>,
}

impl IncomingSong {
    /// Convert to a freshly queued domain request.
    pub fn into_request(self) -> SongRequest {
        let mut request = SongRequest::new(RequestId::new(self.id), self.song_name, self.artist_name)
            .with_likes(self.votes);
        request.image_url = self.image_url;
        request
    }
}

fn song_payload<'de, D>(deserializer: D) -> std::result::Result<IncomingSong, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => {
            serde_json::from_str(&s).map_err(serde::de::Error::custom)
        }
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_core::LifecycleState;

    #[test]
    fn join_frame_round_trips() {
        let frame = ClientFrame::JoinEventGroup {
            event_id: "12".to_string(),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains(r#""type":"JoinEventGroup""#));
        assert!(json.contains(r#""eventId":"12""#));
        assert_eq!(serde_json::from_str::<ClientFrame>(&json).unwrap(), frame);
    }

    #[test]
    fn song_frame_with_inline_payload() {
        let frame: ServerFrame = serde_json::from_str(
            r#"{"type": "SongEnteredQueue",
                "payload": {"ID": 9, "SongName": "Hey", "ArtistName": "Pixies", "Votes": 1}}"#,
        )
        .unwrap();

        let ServerFrame::SongEnteredQueue { payload } = frame;
        assert_eq!(payload.id, "9");
        assert_eq!(payload.votes, 1);
    }

    #[test]
    fn song_frame_with_string_payload() {
        let frame: ServerFrame = serde_json::from_str(
            r#"{"type": "SongEnteredQueue",
                "payload": "{\"ID\": \"9\", \"SongName\": \"Hey\", \"ArtistName\": \"Pixies\"}"}"#,
        )
        .unwrap();

        let ServerFrame::SongEnteredQueue { payload } = frame;
        assert_eq!(payload.id, "9");
    }

    #[test]
    fn incoming_song_becomes_queued_request() {
        let song = IncomingSong {
            id: "9".to_string(),
            song_name: "Hey".to_string(),
            artist_name: "Pixies".to_string(),
            votes: 2,
            image_url: Some("https://img".to_string()),
        };

        let request = song.into_request();
        assert_eq!(request.state, LifecycleState::Queued);
        assert_eq!(request.likes, 2);
        assert_eq!(request.image_url.as_deref(), Some("https://img"));
        assert!(request.timestamp.is_none());
    }
}
