//! Main VibeQueue backend client.

use crate::auth::AuthClient;
use crate::collaborators::CollaboratorsClient;
use crate::earnings::EarningsClient;
use crate::error::{ClientError, Result};
use crate::events::EventsClient;
use crate::profile::ProfileClient;
use crate::requests::RequestsClient;
use crate::types::{ClientConfig, LoginResponse, ProfileInfo};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Main client for interacting with a VibeQueue backend.
///
/// Handles authentication and hands out per-concern sub-clients for
/// events, song requests, earnings, collaborators and profile calls.
///
/// # Example
///
/// ```ignore
/// use vibe_server_client::{ClientConfig, VibeServerClient};
///
/// let client = VibeServerClient::new(ClientConfig::new("https://api.example.com"))?;
/// let login = client.login("organizer", "password").await?;
///
/// let details = client.events().await?.get_event_details(&event_id).await?;
/// println!("{} requests queued", details.queue.len());
/// ```
pub struct VibeServerClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl VibeServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized = ClientConfig {
            url,
            access_token: config.access_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("VibeQueue/{} (Organizer)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized)),
        })
    }

    /// Get the backend base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Login with username and password.
    ///
    /// On success, the access token is stored for subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url().await;

        let auth = AuthClient::new(&self.http, &url);
        let response = auth.login(username, password).await?;

        if let Some(token) = &response.access_token {
            let mut config = self.config.write().await;
            config.access_token = Some(token.clone());
        }

        Ok(response)
    }

    /// Register a new account.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        referral_code: Option<&str>,
    ) -> Result<()> {
        let url = self.url().await;
        AuthClient::new(&self.http, &url)
            .register(username, password, email, referral_code)
            .await
    }

    /// Change the current user's password.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<()> {
        let (url, token) = self.authorized().await?;
        AuthClient::new(&self.http, &url)
            .change_password(&token, current, new)
            .await
    }

    /// Get the current user's profile info.
    pub async fn get_profile_info(&self) -> Result<ProfileInfo> {
        let (url, token) = self.authorized().await?;
        AuthClient::new(&self.http, &url)
            .get_profile_info(&token)
            .await
    }

    /// Set a token directly (e.g. restored from disk).
    pub async fn set_token(&self, access_token: String) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token);
    }

    /// Get the current token, if any.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.access_token.clone()
    }

    /// Clear the stored token (logout).
    pub async fn logout(&self) {
        let mut config = self.config.write().await;
        config.access_token = None;
        info!("Logged out");
    }

    /// Events sub-client. Requires authentication.
    pub async fn events(&self) -> Result<EventsClient> {
        let (url, token) = self.authorized().await?;
        Ok(EventsClient::new(self.http.clone(), url, token))
    }

    /// Song request sub-client. Requires authentication.
    pub async fn requests(&self) -> Result<RequestsClient> {
        let (url, token) = self.authorized().await?;
        Ok(RequestsClient::new(self.http.clone(), url, token))
    }

    /// Earnings and payout history sub-client. Requires authentication.
    pub async fn earnings(&self) -> Result<EarningsClient> {
        let (url, token) = self.authorized().await?;
        Ok(EarningsClient::new(self.http.clone(), url, token))
    }

    /// Collaborators sub-client. Requires authentication.
    pub async fn collaborators(&self) -> Result<CollaboratorsClient> {
        let (url, token) = self.authorized().await?;
        Ok(CollaboratorsClient::new(self.http.clone(), url, token))
    }

    /// Profile sub-client. Requires authentication.
    pub async fn profile(&self) -> Result<ProfileClient> {
        let (url, token) = self.authorized().await?;
        Ok(ProfileClient::new(self.http.clone(), url, token))
    }

    async fn authorized(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation() {
        assert!(VibeServerClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(VibeServerClient::new(ClientConfig::new("http://localhost:7135")).is_ok());

        assert!(VibeServerClient::new(ClientConfig::new("")).is_err());
        assert!(VibeServerClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(VibeServerClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn url_normalization() {
        let client =
            VibeServerClient::new(ClientConfig::new("https://example.com/")).expect("valid url");

        let url = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.url());
        assert_eq!(url, "https://example.com");
    }
}
