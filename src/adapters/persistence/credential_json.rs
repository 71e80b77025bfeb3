//! Implements CredentialStore using a JSON file.
//!
//! Holds the bearer token between runs. The file is rewritten atomically on every change.

use crate::domain::DomainError;
use crate::ports::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// JSON file-based credential storage.
pub struct CredentialJson {
    path: PathBuf,
    cache: RwLock<CredentialData>,
}

impl CredentialJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: RwLock::new(CredentialData::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token. A missing or unreadable file means "signed out".
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed credential file");
                CredentialData::default()
            }),
            Err(_) => CredentialData::default(),
        };
        debug!(has_token = data.token.is_some(), "credential loaded");
        *self.cache.write().await = data;
        Ok(())
    }

    /// Write to a temp file, fsync, then rename over the target.
    async fn save(&self) -> Result<(), DomainError> {
        let data = self.cache.read().await;
        let json = serde_json::to_string_pretty(&*data)
            .map_err(|e| DomainError::Credentials(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Credentials(format!("create dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Credentials(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Credentials(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Credentials(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Credentials(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialStore for CredentialJson {
    async fn token(&self) -> Result<Option<String>, DomainError> {
        Ok(self.cache.read().await.token.clone())
    }

    async fn store(&self, token: &str) -> Result<(), DomainError> {
        self.cache.write().await.token = Some(token.to_string());
        self.save().await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            if cache.token.is_none() {
                return Ok(());
            }
            cache.token = None;
        }
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = CredentialJson::new(&path);
        store.load().await.unwrap();
        assert_eq!(store.token().await.unwrap(), None);

        store.store("jwt-abc").await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reloaded = CredentialJson::new(&path);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.token().await.unwrap().as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn test_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = CredentialJson::new(&path);
        store.store("jwt-abc").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.token().await.unwrap(), None);

        let reloaded = CredentialJson::new(&path);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = CredentialJson::new(&path);
        store.load().await.unwrap();
        assert_eq!(store.token().await.unwrap(), None);
    }
}
