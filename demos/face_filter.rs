//! Face filter example: fetch a 3D media item and hand its model to a
//! scene loader.
//!
//! The loader here just downloads the bytes; a real application would plug
//! in its scene framework's glTF importer.

use async_trait::async_trait;
use mira_sdk::{MiraClient, Result, SceneLoader};

struct ByteLoader;

#[async_trait]
impl SceneLoader for ByteLoader {
    type Scene = Vec<u8>;

    async fn load(
        &self,
        url: &str,
    ) -> std::result::Result<Self::Scene, Box<dyn std::error::Error + Send + Sync>> {
        let bytes = reqwest::get(url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("mira_sdk=info")
        .init();

    let client = MiraClient::builder().build()?;

    let id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demo-filter".to_string());
    let media = client.media_by_id(&id).await?;

    let model = client.generate_face_filter(&media, &ByteLoader, true).await?;
    println!("Loaded {} bytes of model data for {}", model.len(), media.id);

    Ok(())
}
