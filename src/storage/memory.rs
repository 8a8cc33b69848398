//! In-memory credential storage for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TokenStorage;
use crate::error::Result;
use crate::models::auth::TokenInfo;

/// In-memory credential storage, primarily for testing.
pub struct MemoryTokenStorage {
    credential: RwLock<Option<TokenInfo>>,
}

impl MemoryTokenStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self {
            credential: RwLock::new(None),
        }
    }
}

impl Default for MemoryTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn load(&self) -> Result<Option<TokenInfo>> {
        Ok(self.credential.read().await.clone())
    }

    async fn save(&self, credential: &TokenInfo) -> Result<()> {
        *self.credential.write().await = Some(credential.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.credential.write().await = None;
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.credential.read().await.is_some())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryTokenStorage::new();

        assert!(storage.load().await.unwrap().is_none());
        assert!(!storage.exists().await.unwrap());

        let credential = TokenInfo::new("token".into(), 42);
        storage.save(&credential).await.unwrap();

        assert!(storage.exists().await.unwrap());
        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, credential);

        storage.remove().await.unwrap();
        assert!(!storage.exists().await.unwrap());
    }
}
