//! Access token persistence between runs.

use crate::error::Result;
use std::path::PathBuf;
use tracing::debug;

/// Stores the bearer token in a plain file so `login` and `open` can be
/// separate invocations.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The saved token, if one exists.
    pub async fn load(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim().to_string();
                (!token.is_empty()).then_some(token)
            }
            Err(_) => None,
        }
    }

    /// Persist a new token, replacing any previous one.
    pub async fn save(&self, token: &str) -> Result<()> {
        tokio::fs::write(&self.path, token).await?;
        debug!(path = %self.path.display(), "Saved access token");
        Ok(())
    }

    /// Remove the saved token. Missing file is fine.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_a_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));

        assert!(store.load().await.is_none());
        store.save("abc123").await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));

        store.clear().await.unwrap();
        store.save("abc123").await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn whitespace_only_file_counts_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));

        store.save("  \n").await.unwrap();
        assert!(store.load().await.is_none());
    }
}
