//! Credential storage backends.
//!
//! Provides the [`TokenStorage`] trait and implementations:
//! - [`FileTokenStorage`] - JSON file with 0600 permissions
//! - [`MemoryTokenStorage`] - In-memory (testing)
//! - [`KeyringTokenStorage`] - System keyring (feature-gated)

mod file;
mod memory;

#[cfg(feature = "keyring")]
mod keyring;

use async_trait::async_trait;

pub use file::FileTokenStorage;
pub use memory::MemoryTokenStorage;

#[cfg(feature = "keyring")]
pub use self::keyring::KeyringTokenStorage;

use crate::error::Result;
use crate::models::auth::TokenInfo;

/// Durable storage for the cached credential, surviving process restarts.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Load the stored credential, if any.
    async fn load(&self) -> Result<Option<TokenInfo>>;

    /// Persist the credential.
    async fn save(&self, credential: &TokenInfo) -> Result<()>;

    /// Remove the stored credential.
    async fn remove(&self) -> Result<()>;

    /// Whether a credential is currently stored.
    async fn exists(&self) -> Result<bool> {
        Ok(self.load().await?.is_some())
    }

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: TokenStorage + ?Sized> TokenStorage for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<TokenInfo>> {
        (**self).load().await
    }
    async fn save(&self, credential: &TokenInfo) -> Result<()> {
        (**self).save(credential).await
    }
    async fn remove(&self) -> Result<()> {
        (**self).remove().await
    }
    async fn exists(&self) -> Result<bool> {
        (**self).exists().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blanket impl for `Box<T>`.
#[async_trait]
impl<T: TokenStorage + ?Sized> TokenStorage for Box<T> {
    async fn load(&self) -> Result<Option<TokenInfo>> {
        (**self).load().await
    }
    async fn save(&self, credential: &TokenInfo) -> Result<()> {
        (**self).save(credential).await
    }
    async fn remove(&self) -> Result<()> {
        (**self).remove().await
    }
    async fn exists(&self) -> Result<bool> {
        (**self).exists().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
