/// Organizer console configuration
use crate::error::{OrganizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrganizerConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_hub")]
    pub hub: HubSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubSettings {
    /// Queue hub endpoint; derived from the API base URL when unset.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl OrganizerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("organizer.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with VIBE_).
        // Keys nest on a double underscore so field names keep their
        // single ones: VIBE_API__BASE_URL, VIBE_AUTH__TOKEN_PATH.
        settings = settings.add_source(
            config::Environment::with_prefix("VIBE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| OrganizerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| OrganizerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(OrganizerError::Config(format!(
                "API base URL must start with http:// or https:// (got {})",
                self.api.base_url
            )));
        }
        Ok(())
    }

    /// The queue hub endpoint, derived from the API base URL unless
    /// configured explicitly.
    pub fn hub_url(&self) -> String {
        if let Some(url) = &self.hub.url {
            return url.clone();
        }
        let base = self.api.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{ws_base}/queuehub")
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    "https://api.vibequeue.app".to_string()
}

fn default_hub() -> HubSettings {
    HubSettings { url: None }
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        token_path: default_token_path(),
    }
}

fn default_token_path() -> PathBuf {
    PathBuf::from(".vibe-token")
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            hub: default_hub(),
            auth: default_auth(),
        }
    }
}
