//! # mira-sdk
//!
//! Rust client library for the Mira immersive media API.
//!
//! Wraps API-key authentication (with local credential caching), media
//! search / trending / lookup, and hands 3D face-filter assets to the
//! embedding application's scene framework.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mira_sdk::{MiraClient, SearchOptions, MediaType, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = MiraClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let page = client
//!         .search(
//!             "sunglasses",
//!             &SearchOptions {
//!                 media_types: vec![MediaType::ThreeD],
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!
//!     for item in &page.media {
//!         println!("{} ({})", item.id, item.media_type);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `keyring` - Store the credential in the system keyring

pub mod analytics;
pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod scene;
pub mod storage;
pub mod transport;

// Re-exports for ergonomic usage
pub use analytics::{AnalyticsSink, NoopAnalytics};
pub use client::{MiraClient, MiraClientBuilder};
pub use config::{ConfigSource, EnvConfig};
pub use error::{AuthError, Error, Result};
pub use models::auth::TokenInfo;
pub use models::media::{
    Category, MediaFiles, MediaItem, MediaPage, MediaType, StereoscopicType,
};
pub use models::options::{SearchOptions, TrendingOptions};
pub use scene::SceneLoader;
pub use storage::TokenStorage;
