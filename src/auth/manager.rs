//! Token lifecycle manager.
//!
//! Owns the cached credential, the authentication gate, and the API key
//! exchange. All fetch operations funnel through
//! [`MiraAuthManager::access_token`], so the credential has a single writer
//! and concurrent stale observations collapse into one exchange.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::{ConfigSource, API_KEY_CONFIG_KEY};
use crate::error::AuthError;
use crate::models::auth::TokenInfo;
use crate::storage::TokenStorage;

use super::exchange;
use super::gate::{AuthGate, Claim, ReleaseGuard};

/// Manages the Mira token lifecycle.
///
/// Thread-safe: the credential sits behind an `RwLock` and the gate behind a
/// watch channel, so the manager can be shared across tasks.
pub struct MiraAuthManager {
    /// Current credential. Written only by the authentication path.
    credential: Arc<RwLock<Option<TokenInfo>>>,
    /// Serializes fetches behind "authentication has completed".
    gate: Arc<AuthGate>,
    /// HTTP client for exchange requests.
    client: reqwest::Client,
    /// API base URL.
    base_url: String,
    /// API key supplied at construction time.
    api_key: Option<String>,
    /// Bundled configuration, consulted when no key was supplied.
    config: Option<Arc<dyn ConfigSource>>,
    /// Optional storage backend for persisting credentials.
    storage: Option<Arc<dyn TokenStorage>>,
}

impl MiraAuthManager {
    /// Create an auth manager for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            credential: Arc::new(RwLock::new(None)),
            gate: Arc::new(AuthGate::new()),
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
            config: None,
            storage: None,
        }
    }

    /// Set the API key used for exchanges.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the bundled configuration source consulted for
    /// [`API_KEY_CONFIG_KEY`] when no key was supplied directly.
    pub fn with_config_source(mut self, config: Arc<dyn ConfigSource>) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the storage backend for credential persistence.
    pub fn with_storage(mut self, storage: Arc<dyn TokenStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the HTTP client (useful for testing or custom TLS config).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Authenticate explicitly, re-opening the gate even after an earlier
    /// failure. Joins an exchange already in flight instead of starting a
    /// second one; in that case `api_key_override` is ignored and the caller
    /// observes the in-flight outcome.
    pub async fn authenticate(&self, api_key_override: Option<&str>) -> Result<(), AuthError> {
        if let Claim::Claimed = self.gate.claim(true) {
            self.spawn_authentication(api_key_override.map(str::to_owned));
        }
        self.gate.wait().await
    }

    /// Wait until authentication has completed for this client, running the
    /// exchange if nobody has yet and re-running it when the cached
    /// credential has gone stale.
    ///
    /// A failed authentication is sticky: fetches observe the stored failure
    /// until [`authenticate`](Self::authenticate) is called again.
    pub async fn ensure_ready(&self) -> Result<(), AuthError> {
        match self.gate.claim(false) {
            Claim::Claimed => {
                self.spawn_authentication(None);
                self.gate.wait().await
            }
            Claim::MustWait => self.gate.wait().await,
            Claim::Done(Err(err)) => Err(err),
            Claim::Done(Ok(())) => {
                if self.credential_is_fresh().await {
                    return Ok(());
                }
                // Stale credential: somebody has to re-run the exchange.
                // The forced claim collapses concurrent stale observations
                // into a single pending window.
                if let Claim::Claimed = self.gate.claim(true) {
                    self.spawn_authentication(None);
                }
                self.gate.wait().await
            }
        }
    }

    /// Get a bearer token for a request, authenticating first if needed.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        self.ensure_ready().await?;
        self.credential
            .read()
            .await
            .as_ref()
            .map(|c| c.token.clone())
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Read-only snapshot of the current credential.
    pub async fn credential(&self) -> Option<TokenInfo> {
        self.credential.read().await.clone()
    }

    async fn credential_is_fresh(&self) -> bool {
        self.credential
            .read()
            .await
            .as_ref()
            .is_some_and(TokenInfo::is_fresh)
    }

    /// Run the authentication on a detached task so that cancelling the
    /// fetch that happened to trigger it never cancels the exchange other
    /// fetches are queued on.
    fn spawn_authentication(&self, api_key_override: Option<String>) {
        let gate = Arc::clone(&self.gate);
        let credential = Arc::clone(&self.credential);
        let storage = self.storage.clone();
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let api_key = self.resolve_api_key(api_key_override.as_deref());

        tokio::spawn(async move {
            let guard = ReleaseGuard::new(&gate);
            let outcome =
                run_authentication(&credential, storage.as_deref(), &client, &base_url, api_key)
                    .await;
            if let Err(err) = guard.finish(outcome) {
                warn!("Authentication failed: {}", err);
            }
        });
    }

    /// Resolve the API key: explicit argument, then the key supplied at
    /// construction, then bundled configuration.
    fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(key) = explicit {
            if !key.is_empty() {
                return Some(key.to_string());
            }
        }
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        self.config
            .as_ref()
            .and_then(|config| config.read(API_KEY_CONFIG_KEY))
            .filter(|key| !key.is_empty())
    }
}

/// The single writer of the credential. Checks the cache (memory, then
/// storage) before spending a network exchange.
async fn run_authentication(
    credential: &RwLock<Option<TokenInfo>>,
    storage: Option<&dyn TokenStorage>,
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<String>,
) -> Result<(), AuthError> {
    // Another task may have refreshed while this one claimed the gate, or a
    // persisted credential may still be usable.
    if let Some(cached) = load_credential(credential, storage).await {
        if cached.is_fresh() {
            debug!("Cached credential is fresh, skipping exchange");
            *credential.write().await = Some(cached);
            return Ok(());
        }
    }

    let Some(api_key) = api_key else {
        return Err(AuthError::MissingApiKey);
    };

    let exchanged = exchange::exchange(client, base_url, &api_key).await?;
    let info = TokenInfo::from_exchange(exchanged.token, exchanged.expires_in);

    if let Some(storage) = storage {
        if let Err(e) = storage.save(&info).await {
            warn!("Failed to persist credential: {}", e);
        }
    }

    *credential.write().await = Some(info);
    info!("Authentication complete");
    Ok(())
}

/// In-memory credential, falling back to the storage backend.
async fn load_credential(
    credential: &RwLock<Option<TokenInfo>>,
    storage: Option<&dyn TokenStorage>,
) -> Option<TokenInfo> {
    if let Some(cached) = credential.read().await.clone() {
        return Some(cached);
    }
    if let Some(storage) = storage {
        match storage.load().await {
            Ok(Some(loaded)) => {
                info!(source = storage.name(), "Loaded credential from storage");
                return Some(loaded);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to load credential from storage: {}", e),
        }
    }
    None
}

impl std::fmt::Debug for MiraAuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiraAuthManager")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}
