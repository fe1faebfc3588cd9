//! Profile and file upload calls.

use crate::envelope::{read_payload, transport_error};
use crate::error::Result;
use crate::types::{ApplicationInfo, ConnectPaymentResponse, UploadImageRequest};
use base64::Engine as _;
use reqwest::Client;
use tracing::{debug, info};

/// Profile client for the VibeQueue backend.
pub struct ProfileClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl ProfileClient {
    pub(crate) fn new(http: Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Start payment-provider onboarding. Returns a URL the user must
    /// open in a browser to complete the connection.
    pub async fn connect_payment(&self) -> Result<ConnectPaymentResponse> {
        let url = format!("{}/Profile/connectPayment", self.base_url);
        info!(url = %url, "Starting payment onboarding");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_payload(response).await
    }

    /// Get application info (version, description).
    pub async fn get_application_info(&self) -> Result<ApplicationInfo> {
        let url = format!("{}/Profile/getApplicationInfo", self.base_url);
        debug!(url = %url, "Fetching application info");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_payload(response).await
    }

    /// Upload a new profile image. The image is sent base64-encoded with
    /// its content type, matching the backend's file endpoint.
    pub async fn upload_profile_image(&self, image: &[u8], content_type: &str) -> Result<()> {
        let url = format!("{}/File/uploadProfileImage", self.base_url);
        debug!(url = %url, bytes = image.len(), "Uploading profile image");

        let body = UploadImageRequest {
            base64_image: base64::engine::general_purpose::STANDARD.encode(image),
            content_type: content_type.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        crate::envelope::read_ack(response).await
    }
}
