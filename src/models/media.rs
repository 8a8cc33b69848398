//! Media types returned by the Mira API.
//!
//! All of these are read-only values; the SDK never mutates what the server
//! returned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The kind of content a media item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
    #[serde(rename = "3d")]
    ThreeD,
}

impl MediaType {
    /// Wire token used in query parameters and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::ThreeD => "3d",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stereoscopic layout of a photo or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StereoscopicType {
    #[serde(rename = "none")]
    Mono,
    #[serde(rename = "top-bottom")]
    TopBottom,
    #[serde(rename = "left-right")]
    LeftRight,
}

impl StereoscopicType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mono => "none",
            Self::TopBottom => "top-bottom",
            Self::LeftRight => "left-right",
        }
    }
}

/// Curated category a media item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Face Filters")]
    FaceFilters,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FaceFilters => "Face Filters",
        }
    }
}

/// Per-format file URLs shipped with a media item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFiles {
    /// Binary glTF model, present for `3d` media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb: Option<String>,
    /// Plain glTF variant, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gltf: Option<String>,
    /// Preview image URLs keyed by resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<HashMap<String, String>>,
}

/// A single media item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub files: MediaFiles,
}

impl MediaItem {
    /// URL of the glb model, if this item ships one.
    pub fn glb_url(&self) -> Option<&str> {
        self.files.glb.as_deref()
    }
}

/// One page of list results. Produced once per call and not cached.
///
/// Which pagination field is populated depends on the endpoint: search pages
/// carry `next_page_num`, trending pages carry `next_page_cursor`.
#[derive(Debug, Clone)]
pub struct MediaPage {
    pub media: Vec<MediaItem>,
    pub next_page_num: Option<u32>,
    pub next_page_cursor: Option<String>,
}

/// Wire envelope for list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub media: Option<Vec<MediaItem>>,
    #[serde(default)]
    pub next_page_num: Option<u32>,
    #[serde(default)]
    pub next_page_cursor: Option<String>,
}

/// Wire envelope for single-item lookup.
#[derive(Debug, Deserialize)]
pub struct SingleMediaEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub media: Option<MediaItem>,
}
