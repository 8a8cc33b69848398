//! File-based credential storage with secure permissions.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::TokenStorage;
use crate::error::{Error, Result};
use crate::models::auth::TokenInfo;

/// File-based credential storage using JSON with 0600 permissions.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Create storage at the specified path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create storage at the default path: `~/.config/mira-sdk/credential.json`
    pub fn default_path() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
        let path = config_dir.join("mira-sdk").join("credential.json");
        Ok(Self::new(path))
    }

    fn read(&self) -> Result<Option<TokenInfo>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::StorageSerialization(e.to_string()))
    }

    fn write(&self, credential: &TokenInfo) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::storage_io(parent, e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(credential)
            .map_err(|e| Error::StorageSerialization(e.to_string()))?;
        std::fs::write(&self.path, &content)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;

        // Set 0600 permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| Error::storage_io(&self.path, format!("chmod: {}", e)))?;
        }

        debug!(path = %self.path.display(), "Credential saved");
        Ok(())
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn load(&self) -> Result<Option<TokenInfo>> {
        self.read()
    }

    async fn save(&self, credential: &TokenInfo) -> Result<()> {
        self.write(credential)
    }

    async fn remove(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
