//! User account methods for the VibeQueue backend.

use crate::envelope::{read_ack, read_payload, transport_error};
use crate::error::{ClientError, Result};
use crate::types::{ChangePasswordRequest, LoginRequest, LoginResponse, ProfileInfo,
    RegisterRequest};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the VibeQueue backend.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with username and password.
    ///
    /// The login endpoint is the one call that answers outside the usual
    /// success/message envelope; its body carries the token directly.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/User/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.as_u16() == 401 {
            warn!(status = %status, "Login failed: invalid credentials");
            return Err(ClientError::AuthFailed(
                "Invalid username or password".to_string(),
            ));
        }

        let login: LoginResponse = crate::envelope::read_bare(response).await?;

        if !login.success || login.access_token.is_none() {
            let reason = login
                .message
                .unwrap_or_else(|| "Login failed".to_string());
            warn!(reason = %reason, "Login rejected");
            return Err(ClientError::AuthFailed(reason));
        }

        info!(
            username = login.username.as_deref().unwrap_or(username),
            "Login successful"
        );

        Ok(login)
    }

    /// Register a new account.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        referral_code: Option<&str>,
    ) -> Result<()> {
        let url = format!("{}/User/register", self.base_url);
        debug!(url = %url, username = %username, "Registering account");

        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            referral_code: referral_code.map(ToString::to_string),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }

    /// Change the password of the authenticated user.
    pub async fn change_password(
        &self,
        access_token: &str,
        current: &str,
        new: &str,
    ) -> Result<()> {
        let url = format!("{}/User/changepassword", self.base_url);
        debug!(url = %url, "Changing password");

        let request = ChangePasswordRequest {
            currentpassword: current.to_string(),
            newpassword: new.to_string(),
        };

        let response = self
            .http
            .put(&url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response).await
    }

    /// Get profile info for the authenticated user.
    pub async fn get_profile_info(&self, access_token: &str) -> Result<ProfileInfo> {
        let url = format!("{}/User/getProfileInfo", self.base_url);
        debug!(url = %url, "Fetching profile info");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        read_payload(response).await
    }
}
