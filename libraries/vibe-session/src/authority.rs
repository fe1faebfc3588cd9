//! Remote authority for lifecycle transitions.

use async_trait::async_trait;
use vibe_core::{EventId, RequestId};
use vibe_server_client::{ClientError, FinishedSongRow, RequestsClient, SongRow};

/// The backend side of every lifecycle transition.
///
/// The session never advances a request's state on its own; it asks
/// the authority and applies the confirmed record the authority hands
/// back. Implemented by [`RequestsClient`] for the real backend and by
/// mocks in tests.
#[async_trait]
pub trait RequestAuthority: Send + Sync {
    /// Accept a queued request onto the play queue.
    async fn mark_accepted(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<SongRow, ClientError>;

    /// Reject a queued request.
    async fn mark_rejected(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<SongRow, ClientError>;

    /// Begin playback of an accepted request.
    async fn mark_playing(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<(), ClientError>;

    /// Finish playback, collecting the payment for the request.
    async fn mark_finished(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<FinishedSongRow, ClientError>;
}

#[async_trait]
impl RequestAuthority for RequestsClient {
    async fn mark_accepted(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<SongRow, ClientError> {
        RequestsClient::mark_accepted(self, event_id, request_id).await
    }

    async fn mark_rejected(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<SongRow, ClientError> {
        RequestsClient::mark_rejected(self, event_id, request_id).await
    }

    async fn mark_playing(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<(), ClientError> {
        RequestsClient::mark_playing(self, event_id, request_id).await
    }

    async fn mark_finished(
        &self,
        event_id: &EventId,
        request_id: &RequestId,
    ) -> Result<FinishedSongRow, ClientError> {
        RequestsClient::mark_finished(self, event_id, request_id).await
    }
}
