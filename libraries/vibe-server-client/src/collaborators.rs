//! Collaborator (revenue-share) calls.

use crate::envelope::{read_ack, read_payload, transport_error};
use crate::error::Result;
use crate::types::{AddCollaboratorRequest, CollaboratorRow, DeleteCollaboratorRequest};
use reqwest::Client;
use tracing::debug;
use vibe_core::{CollaboratorId, EventId};

/// Collaborators client for the VibeQueue backend.
pub struct CollaboratorsClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl CollaboratorsClient {
    pub(crate) fn new(http: Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List all collaborators on an event.
    pub async fn get_all(&self, event_id: &EventId) -> Result<Vec<CollaboratorRow>> {
        let url = format!(
            "{}/Collaborator/getAllCollaborators?eventid={}",
            self.base_url, event_id
        );
        debug!(url = %url, "Fetching collaborators");

        // The backend expects POST here despite the query-string argument.
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_payload(response).await
    }

    /// Add a collaborator to an event by their user code.
    pub async fn add(&self, event_id: &EventId, user_code: &str, percentage: f64) -> Result<()> {
        let url = format!("{}/Collaborator/addCollaborator", self.base_url);
        debug!(url = %url, event_id = %event_id, "Adding collaborator");

        let body = AddCollaboratorRequest {
            eventid: event_id.to_string(),
            usercode: user_code.to_string(),
            percentage,
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

    /// Remove a collaborator from an event.
    pub async fn delete(&self, event_id: &EventId, collaborator_id: CollaboratorId) -> Result<()> {
        let url = format!("{}/Collaborator/deleteCollaborator", self.base_url);
        debug!(url = %url, collaborator_id = %collaborator_id, "Deleting collaborator");

        let body = DeleteCollaboratorRequest {
            event_id: event_id.to_string(),
            collaborator_id: collaborator_id.value(),
        };

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }
}
