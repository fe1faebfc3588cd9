//! Event operations for the VibeQueue backend.

use crate::envelope::{read_ack, read_payload, transport_error};
use crate::error::Result;
use crate::types::{CreateEventRequest, EventDetails, EventRow, ModifyEventRequest};
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use vibe_core::EventId;

/// Events client for the VibeQueue backend.
pub struct EventsClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl EventsClient {
    pub(crate) fn new(http: Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List all events owned by or shared with the current user.
    pub async fn get_all_events(&self) -> Result<Vec<EventRow>> {
        let url = format!("{}/Event/getAllEvents", self.base_url);
        debug!(url = %url, "Fetching all events");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let events: Vec<EventRow> = read_payload(response).await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    /// Get the full bucket snapshot for one event.
    ///
    /// This seeds an event session: queue, playlist and history plus the
    /// running earnings total.
    pub async fn get_event_details(&self, event_id: &EventId) -> Result<EventDetails> {
        let url = format!(
            "{}/Event/getEventById?eventId={}",
            self.base_url, event_id
        );
        debug!(url = %url, "Fetching event details");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let details: EventDetails = read_payload(response).await?;
        debug!(
            queue = details.queue.len(),
            playlist = details.playlist.len(),
            history = details.history.len(),
            "Fetched event details"
        );
        Ok(details)
    }

    /// Create a new event.
    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<()> {
        let url = format!("{}/Event/createEvent", self.base_url);
        debug!(url = %url, name = %request.eventname, "Creating event");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }

    /// Update an existing event's settings.
    pub async fn modify_event(&self, request: &ModifyEventRequest) -> Result<()> {
        let url = format!("{}/Event/modifyEvent", self.base_url);
        debug!(url = %url, event_id = %request.eventid, "Modifying event");

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }

    /// Delete an event.
    pub async fn delete_event(&self, event_id: &EventId) -> Result<()> {
        let url = format!("{}/Event/deleteEvent", self.base_url);
        debug!(url = %url, event_id = %event_id, "Deleting event");

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "eventid": event_id.as_str() }))
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }
}
