//! Mira API header construction.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("mira-sdk-rs/", env!("CARGO_PKG_VERSION"));

/// Build the standard headers for authenticated Mira API requests.
pub fn api_headers(access_token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        reqwest::header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", access_token))
            .unwrap_or_else(|_| HeaderValue::from_static("Bearer invalid")),
    );

    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );

    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(USER_AGENT),
    );

    // Unique request ID for server-side tracing
    headers.insert(
        HeaderName::from_static("x-request-id"),
        HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap_or_else(|_| {
            HeaderValue::from_static("00000000-0000-0000-0000-000000000000")
        }),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_present() {
        let headers = api_headers("tok-123");
        assert_eq!(
            headers.get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok-123"
        );
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = api_headers("t");
        let b = api_headers("t");
        assert_ne!(a.get("x-request-id").unwrap(), b.get("x-request-id").unwrap());
    }
}
