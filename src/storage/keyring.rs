//! System keyring credential storage.

use async_trait::async_trait;
use tracing::debug;

use super::TokenStorage;
use crate::error::{Error, Result};
use crate::models::auth::TokenInfo;

/// Stores the credential in the operating system keyring.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    /// Create storage under the default `mira-sdk` service name.
    pub fn new() -> Self {
        Self::with_service("mira-sdk")
    }

    /// Create storage under a custom service name, for applications that
    /// embed multiple clients.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: "credential".into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.user)
            .map_err(|e| Error::Keyring(e.to_string()))
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStorage for KeyringTokenStorage {
    async fn load(&self) -> Result<Option<TokenInfo>> {
        match self.entry()?.get_password() {
            Ok(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| Error::StorageSerialization(e.to_string())),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(Error::Keyring(e.to_string())),
        }
    }

    async fn save(&self, credential: &TokenInfo) -> Result<()> {
        let json = serde_json::to_string(credential)
            .map_err(|e| Error::StorageSerialization(e.to_string()))?;
        self.entry()?
            .set_password(&json)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        debug!(service = %self.service, "Credential saved to keyring");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(Error::Keyring(e.to_string())),
        }
    }

    fn name(&self) -> &str {
        "keyring"
    }
}
