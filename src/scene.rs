//! Scene-loading collaborator interface.
//!
//! The SDK decides whether a media item can produce a scene and classifies
//! the loader's outcome; fetching and parsing the binary model, and walking
//! the resulting node hierarchy, belong to the embedding application's
//! scene framework.

use async_trait::async_trait;

/// Fetches and parses a binary 3D model (`glb`) into a scene graph.
///
/// Loader failures surface to SDK callers as
/// [`Error::SceneLoad`](crate::error::Error::SceneLoad).
#[async_trait]
pub trait SceneLoader: Send + Sync {
    /// The scene-graph type of the underlying framework.
    type Scene: Send;

    /// Fetch and parse the model at `url`.
    async fn load(
        &self,
        url: &str,
    ) -> std::result::Result<Self::Scene, Box<dyn std::error::Error + Send + Sync>>;

    /// Fetch and parse a face-filter model at `url`.
    ///
    /// `use_occluder` tells the loader to keep or strip the occluder
    /// geometry shipped with the model. The default implementation ignores
    /// the flag and delegates to [`load`](Self::load).
    async fn load_face_filter(
        &self,
        url: &str,
        use_occluder: bool,
    ) -> std::result::Result<Self::Scene, Box<dyn std::error::Error + Send + Sync>> {
        let _ = use_occluder;
        self.load(url).await
    }
}
