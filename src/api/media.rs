//! Media endpoints: search, trending, and lookup by ID.

use tracing::debug;

use crate::config;
use crate::error::{Error, Result};
use crate::models::media::{MediaItem, MediaListEnvelope, MediaPage, SingleMediaEnvelope};
use crate::models::options::{SearchOptions, TrendingOptions};
use crate::transport::http::MiraHttpClient;

/// Search the media catalog.
///
/// The query is sent as-is; the server decides how to treat an empty query.
pub async fn search(
    http: &MiraHttpClient,
    base_url: &str,
    query: &str,
    options: &SearchOptions,
) -> Result<MediaPage> {
    let url = config::search_url(base_url);
    let mut params = vec![("q", query.to_string())];
    params.extend(options.to_query_params());

    let envelope: MediaListEnvelope = http.get_json(&url, &params).await?;
    into_page(envelope)
}

/// Fetch the trending media curated for the moment.
pub async fn trending(
    http: &MiraHttpClient,
    base_url: &str,
    options: &TrendingOptions,
) -> Result<MediaPage> {
    let url = config::trending_url(base_url);
    let params = options.to_query_params();

    let envelope: MediaListEnvelope = http.get_json(&url, &params).await?;
    into_page(envelope)
}

/// Fetch a single media item by its ID.
pub async fn by_id(http: &MiraHttpClient, base_url: &str, id: &str) -> Result<MediaItem> {
    let url = config::media_by_id_url(base_url, id)?;

    let envelope: SingleMediaEnvelope = http.get_json(&url, &[]).await?;
    envelope.media.ok_or(Error::MissingPayload)
}

/// The server answered; an absent media array means "nothing to return",
/// which callers must be able to tell apart from a request that failed.
fn into_page(envelope: MediaListEnvelope) -> Result<MediaPage> {
    let media = envelope.media.ok_or(Error::MissingPayload)?;
    debug!(count = media.len(), "Media page fetched");
    Ok(MediaPage {
        media,
        next_page_num: envelope.next_page_num,
        next_page_cursor: envelope.next_page_cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_page_with_media() {
        let envelope: MediaListEnvelope = serde_json::from_value(serde_json::json!({
            "success": true,
            "media": [{ "id": "a1", "type": "photo" }],
            "nextPageNum": 2
        }))
        .unwrap();

        let page = into_page(envelope).unwrap();
        assert_eq!(page.media.len(), 1);
        assert_eq!(page.next_page_num, Some(2));
        assert_eq!(page.next_page_cursor, None);
    }

    #[test]
    fn test_into_page_without_media_is_missing_payload() {
        let envelope: MediaListEnvelope =
            serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
        assert!(matches!(into_page(envelope), Err(Error::MissingPayload)));
    }

    #[test]
    fn test_into_page_with_empty_media_array_succeeds() {
        // An empty array is a present payload: zero results, not a protocol
        // violation.
        let envelope: MediaListEnvelope = serde_json::from_value(serde_json::json!({
            "success": true,
            "media": []
        }))
        .unwrap();
        let page = into_page(envelope).unwrap();
        assert!(page.media.is_empty());
    }
}
