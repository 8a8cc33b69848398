//! Main client entry point.

use std::sync::Arc;

use tracing::{debug, info};

use crate::analytics::{AnalyticsSink, NoopAnalytics, EVENT_FACE_FILTER_REQUESTED, EVENT_NODE_REQUESTED};
use crate::auth::MiraAuthManager;
use crate::config::{ConfigSource, EnvConfig, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::models::media::{MediaItem, MediaPage, MediaType};
use crate::models::options::{SearchOptions, TrendingOptions};
use crate::scene::SceneLoader;
use crate::transport::http::MiraHttpClient;

/// Mira API client.
///
/// Construct one per API key and share it; every operation authenticates on
/// demand through the shared gate, so concurrent calls never race an
/// in-flight token exchange.
///
/// # Examples
///
/// ```rust,no_run
/// use mira_sdk::{MiraClient, SearchOptions, MediaType};
///
/// # async fn example() -> mira_sdk::Result<()> {
/// let client = MiraClient::builder()
///     .api_key("your-api-key")
///     .build()?;
///
/// let page = client
///     .search(
///         "sunglasses",
///         &SearchOptions {
///             media_types: vec![MediaType::ThreeD],
///             ..Default::default()
///         },
///     )
///     .await?;
///
/// for item in &page.media {
///     println!("{} ({})", item.id, item.media_type);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MiraClient {
    auth: Arc<MiraAuthManager>,
    http: Arc<MiraHttpClient>,
    base_url: String,
    analytics: Arc<dyn AnalyticsSink>,
}

impl MiraClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> MiraClientBuilder {
        MiraClientBuilder::new()
    }

    /// Authenticate with the configured API key.
    ///
    /// Fetch operations authenticate on demand, so calling this explicitly
    /// is only needed to surface auth errors early, or to recover after a
    /// failed attempt (a failed authentication is sticky until re-invoked).
    pub async fn authenticate(&self) -> Result<()> {
        self.auth.authenticate(None).await?;
        Ok(())
    }

    /// Authenticate with an explicit API key, overriding the configured one.
    pub async fn authenticate_with_key(&self, api_key: &str) -> Result<()> {
        self.auth.authenticate(Some(api_key)).await?;
        Ok(())
    }

    /// Search the media catalog.
    ///
    /// An empty query is sent as-is; the server decides how to answer it.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<MediaPage> {
        crate::api::media::search(&self.http, &self.base_url, query, options).await
    }

    /// Fetch the currently trending media.
    pub async fn trending(&self, options: &TrendingOptions) -> Result<MediaPage> {
        crate::api::media::trending(&self.http, &self.base_url, options).await
    }

    /// Fetch a single media item by its ID.
    pub async fn media_by_id(&self, id: &str) -> Result<MediaItem> {
        crate::api::media::by_id(&self.http, &self.base_url, id).await
    }

    /// Load the full 3D scene for a `3d` media item.
    ///
    /// Suitable for whole-model placement; face filters should go through
    /// [`generate_face_filter`](Self::generate_face_filter) instead.
    pub async fn generate_node<L: SceneLoader>(
        &self,
        media: &MediaItem,
        loader: &L,
    ) -> Result<L::Scene> {
        let url = self.scene_url(media)?;
        debug!(media_id = %media.id, "Loading 3D node");

        let scene = loader
            .load(url)
            .await
            .map_err(|e| Error::SceneLoad(e.to_string()))?;

        self.analytics.track(
            EVENT_NODE_REQUESTED,
            serde_json::json!({ "media_id": media.id }),
        );
        Ok(scene)
    }

    /// Load a face-filter scene for a `3d` media item.
    ///
    /// `use_occluder` keeps or strips the occluder geometry shipped with the
    /// model; the flag is forwarded to the loader.
    pub async fn generate_face_filter<L: SceneLoader>(
        &self,
        media: &MediaItem,
        loader: &L,
        use_occluder: bool,
    ) -> Result<L::Scene> {
        let url = self.scene_url(media)?;
        debug!(media_id = %media.id, use_occluder, "Loading face filter");

        let scene = loader
            .load_face_filter(url, use_occluder)
            .await
            .map_err(|e| Error::SceneLoad(e.to_string()))?;

        self.analytics.track(
            EVENT_FACE_FILTER_REQUESTED,
            serde_json::json!({ "media_id": media.id }),
        );
        Ok(scene)
    }

    /// Precondition checks common to both scene operations. No network call
    /// is made when they fail.
    fn scene_url<'m>(&self, media: &'m MediaItem) -> Result<&'m str> {
        if media.media_type != MediaType::ThreeD {
            return Err(Error::InvalidMediaForOperation {
                id: media.id.clone(),
                media_type: media.media_type,
            });
        }
        media
            .glb_url()
            .ok_or_else(|| Error::MissingGlbFile(media.id.clone()))
    }

    /// Get a reference to the auth manager.
    pub fn auth(&self) -> &MiraAuthManager {
        &self.auth
    }

    /// The API base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for MiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiraClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for [`MiraClient`].
pub struct MiraClientBuilder {
    base_url: String,
    api_key: Option<String>,
    config_source: Option<Arc<dyn ConfigSource>>,
    storage: Option<Arc<dyn crate::storage::TokenStorage>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    reqwest_client: Option<reqwest::Client>,
}

impl MiraClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            config_source: None,
            storage: None,
            analytics: None,
            reqwest_client: None,
        }
    }

    /// Set the API key used for token exchanges.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API base URL (e.g. a staging environment).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bundled configuration source the API key falls back to.
    /// Defaults to reading the process environment.
    pub fn config_source(mut self, config: Arc<dyn ConfigSource>) -> Self {
        self.config_source = Some(config);
        self
    }

    /// Set a credential storage backend.
    pub fn storage(mut self, storage: Arc<dyn crate::storage::TokenStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set an analytics sink. Defaults to discarding events.
    pub fn analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Set a custom reqwest client.
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MiraClient> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "invalid base URL: '{}'",
                self.base_url
            )));
        }
        let base_url = self.base_url.trim_end_matches('/').to_string();

        let mut auth = MiraAuthManager::new(base_url.clone());
        if let Some(api_key) = self.api_key {
            auth = auth.with_api_key(api_key);
        }
        auth = auth.with_config_source(
            self.config_source
                .unwrap_or_else(|| Arc::new(EnvConfig)),
        );
        if let Some(storage) = self.storage {
            auth = auth.with_storage(storage);
        }
        if let Some(client) = &self.reqwest_client {
            auth = auth.with_client(client.clone());
        }

        let auth = Arc::new(auth);
        let http = match self.reqwest_client {
            Some(client) => MiraHttpClient::with_client(client, Arc::clone(&auth)),
            None => MiraHttpClient::new(Arc::clone(&auth)),
        };

        info!("MiraClient initialized");
        Ok(MiraClient {
            auth,
            http: Arc::new(http),
            base_url,
            analytics: self
                .analytics
                .unwrap_or_else(|| Arc::new(NoopAnalytics)),
        })
    }
}

impl Default for MiraClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::MediaFiles;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SceneLoader for CountingLoader {
        type Scene = &'static str;

        async fn load(
            &self,
            _url: &str,
        ) -> std::result::Result<Self::Scene, Box<dyn std::error::Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("scene")
        }
    }

    fn photo_item() -> MediaItem {
        MediaItem {
            id: "p1".into(),
            media_type: MediaType::Photo,
            title: None,
            authors: None,
            files: MediaFiles::default(),
        }
    }

    fn three_d_item(glb: Option<&str>) -> MediaItem {
        MediaItem {
            id: "m1".into(),
            media_type: MediaType::ThreeD,
            title: None,
            authors: None,
            files: MediaFiles {
                glb: glb.map(str::to_owned),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        assert!(MiraClient::builder().base_url("not-a-url").build().is_err());
    }

    #[tokio::test]
    async fn test_generate_node_rejects_non_3d_media() {
        let client = MiraClient::builder().api_key("k").build().unwrap();
        let loader = CountingLoader {
            calls: AtomicUsize::new(0),
        };

        let err = client
            .generate_node(&photo_item(), &loader)
            .await
            .unwrap_err();
        match err {
            Error::InvalidMediaForOperation { id, media_type } => {
                assert_eq!(id, "p1");
                assert_eq!(media_type, MediaType::Photo);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The loader was never consulted, and no network call was made.
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_face_filter_requires_glb() {
        let client = MiraClient::builder().api_key("k").build().unwrap();
        let loader = CountingLoader {
            calls: AtomicUsize::new(0),
        };

        let err = client
            .generate_face_filter(&three_d_item(None), &loader, true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingGlbFile(id) if id == "m1"));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_node_loads_scene() {
        let client = MiraClient::builder().api_key("k").build().unwrap();
        let loader = CountingLoader {
            calls: AtomicUsize::new(0),
        };

        let scene = client
            .generate_node(&three_d_item(Some("https://cdn.mira.media/m1.glb")), &loader)
            .await
            .unwrap();
        assert_eq!(scene, "scene");
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }
}
