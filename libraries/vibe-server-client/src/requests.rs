//! Song request lifecycle calls.
//!
//! The backend is the authority for every lifecycle transition: callers
//! ask for a state change and only mutate local state once the server
//! confirms with the canonical record.

use crate::envelope::{read_ack, read_payload, transport_error};
use crate::error::Result;
use crate::types::{FinishedSongRow, ModifySongRequest, ModifyState, SongRow,
    StartPlayingRequest};
use reqwest::Client;
use tracing::debug;
use vibe_core::{EventId, RequestId};

/// Song request client for the VibeQueue backend.
pub struct RequestsClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl RequestsClient {
    pub(crate) fn new(http: Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    async fn modify(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
        state: ModifyState,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/SongRequest/modifySongRequest", self.base_url);
        debug!(
            url = %url,
            request_id = %request_id,
            state = state.code(),
            "Modifying song request"
        );

        let body = ModifySongRequest {
            songrequestid: request_id.to_string(),
            state: state.code().to_string(),
            eventid: event_id.to_string(),
        };

        self.http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)
    }

    /// Mark a queued request as accepted onto the play queue.
    ///
    /// Returns the server's canonical record for the request.
    pub async fn mark_accepted(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<SongRow> {
        let response = self
            .modify(event_id, request_id, ModifyState::OnPlayQueue)
            .await?;
        read_payload(response).await
    }

    /// Mark a queued request as rejected.
    ///
    /// Returns the server's canonical record with the rejection timestamp.
    pub async fn mark_rejected(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<SongRow> {
        let response = self
            .modify(event_id, request_id, ModifyState::Rejected)
            .await?;
        read_payload(response).await
    }

    /// Mark a playing request as finished.
    ///
    /// Returns the canonical record, the completion timestamp and the
    /// payment collected for the finished playback.
    pub async fn mark_finished(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<FinishedSongRow> {
        let response = self
            .modify(event_id, request_id, ModifyState::Finished)
            .await?;
        read_payload(response).await
    }

    /// Tell the backend that playback of an accepted request has begun.
    pub async fn mark_playing(&self, event_id: &EventId, request_id: &RequestId) -> Result<()> {
        let url = format!("{}/SongRequest/startPlayingSong", self.base_url);
        debug!(url = %url, request_id = %request_id, "Starting playback");

        let body = StartPlayingRequest {
            songrequestid: request_id.to_string(),
            eventid: event_id.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }
}
