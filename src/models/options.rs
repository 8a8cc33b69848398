//! Query options for the list endpoints and their wire-parameter mapping.
//!
//! Building the parameter list is pure and deterministic: absent fields are
//! omitted from the outgoing request entirely, never sent as empty values.

use crate::models::media::{Category, MediaType, StereoscopicType};

/// Options accepted by the search endpoint. Search paginates by page number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Restrict results to these media types. Empty means no restriction.
    pub media_types: Vec<MediaType>,
    pub stereoscopic_type: Option<StereoscopicType>,
    pub category: Option<Category>,
    /// Results per page, 1 to 100. Passed through as-is; the server clamps
    /// or rejects out-of-range values.
    pub size: Option<u32>,
    /// Page to fetch, taken from a previous page's `next_page_num`.
    pub page_num: Option<u32>,
}

impl SearchOptions {
    /// Map these options to query parameters, in a stable order.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = common_params(
            &self.media_types,
            self.stereoscopic_type,
            self.category,
            self.size,
        );
        if let Some(page) = self.page_num {
            params.push(("pageNum", page.to_string()));
        }
        params
    }
}

/// Options accepted by the trending endpoint. Trending paginates by cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingOptions {
    /// Restrict results to these media types. Empty means no restriction.
    pub media_types: Vec<MediaType>,
    pub stereoscopic_type: Option<StereoscopicType>,
    pub category: Option<Category>,
    /// Results per page, 1 to 100. Passed through as-is.
    pub size: Option<u32>,
    /// Opaque cursor from a previous page's `next_page_cursor`.
    pub next_page_cursor: Option<String>,
}

impl TrendingOptions {
    /// Map these options to query parameters, in a stable order.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = common_params(
            &self.media_types,
            self.stereoscopic_type,
            self.category,
            self.size,
        );
        if let Some(cursor) = &self.next_page_cursor {
            params.push(("nextPageCursor", cursor.clone()));
        }
        params
    }
}

/// Parameters shared by both list endpoints.
fn common_params(
    media_types: &[MediaType],
    stereoscopic_type: Option<StereoscopicType>,
    category: Option<Category>,
    size: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if !media_types.is_empty() {
        let joined = media_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        params.push(("type", joined));
    }
    if let Some(stereo) = stereoscopic_type {
        params.push(("stereoscopicType", stereo.as_str().to_string()));
    }
    if let Some(category) = category {
        params.push(("category", category.as_str().to_string()));
    }
    if let Some(size) = size {
        params.push(("size", size.to_string()));
    }
    params
}
