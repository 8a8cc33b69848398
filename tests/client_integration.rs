//! Integration tests driving the client against a mock Mira API server.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mira_sdk::{
    AuthError, ConfigSource, Error, MediaType, MiraClient, SearchOptions, TokenInfo,
    TokenStorage, TrendingOptions,
};
use mira_sdk::storage::MemoryTokenStorage;

/// A configuration source with nothing in it, so tests never pick up an API
/// key from the environment.
struct NoConfig;

impl ConfigSource for NoConfig {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn auth_ok(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "token": token,
        "expiresIn": 3600,
    }))
}

fn media_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "media": [
            {
                "id": "m1",
                "type": "3d",
                "title": "Sunglasses",
                "files": { "glb": "https://cdn.example/m1.glb" }
            }
        ],
        "nextPageNum": 2,
    }))
}

async fn auth_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/app/authenticate")
        .count()
}

fn client_for(server: &MockServer) -> MiraClient {
    MiraClient::builder()
        .base_url(server.uri())
        .api_key("test-api-key")
        .config_source(Arc::new(NoConfig))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_search_authenticates_then_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/search"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("q", "sunglasses"))
        .and(query_param("type", "3d"))
        .and(query_param("size", "10"))
        .respond_with(media_page())
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .search(
            "sunglasses",
            &SearchOptions {
                media_types: vec![MediaType::ThreeD],
                size: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.media.len(), 1);
    assert_eq!(page.media[0].id, "m1");
    assert_eq!(page.media[0].media_type, MediaType::ThreeD);
    assert_eq!(page.next_page_num, Some(2));
    assert_eq!(auth_requests(&server).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_fetches_share_one_exchange() {
    let server = MockServer::start().await;

    // Slow the exchange down so every fetch queues on the gate.
    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token").set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/trending"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(media_page())
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            client.trending(&TrendingOptions::default()).await
        }));
    }

    for handle in handles {
        let page = handle.await.unwrap().unwrap();
        assert_eq!(page.media.len(), 1);
    }

    assert_eq!(auth_requests(&server).await, 1);
}

#[tokio::test]
async fn test_missing_media_is_classified_as_missing_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    // Success envelope without a media array.
    Mock::given(method("GET"))
        .and(path("/media/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search("anything", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingPayload));
}

#[tokio::test]
async fn test_server_error_is_classified_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/trending"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .trending(&TrendingOptions::default())
        .await
        .unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_and_leaves_credential_alone() {
    // Fresh stored credential, so no exchange is attempted; the fetch itself
    // fails at the transport layer.
    let storage = Arc::new(MemoryTokenStorage::new());
    let stored = TokenInfo::new("stored-token".into(), now() + 3600);
    storage.save(&stored).await.unwrap();

    let client = MiraClient::builder()
        .base_url("http://127.0.0.1:1")
        .config_source(Arc::new(NoConfig))
        .storage(Arc::clone(&storage) as Arc<dyn TokenStorage>)
        .build()
        .unwrap();

    let err = client
        .search("x", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_) | Error::Timeout));

    // The failed fetch did not touch the credential.
    assert_eq!(storage.load().await.unwrap(), Some(stored));
}

#[tokio::test]
async fn test_fresh_stored_credential_performs_zero_exchanges() {
    let server = MockServer::start().await;

    let storage = Arc::new(MemoryTokenStorage::new());
    storage
        .save(&TokenInfo::new("stored-token".into(), now() + 3600))
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/media/search"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(media_page())
        .mount(&server)
        .await;

    let client = MiraClient::builder()
        .base_url(server.uri())
        .config_source(Arc::new(NoConfig))
        .storage(storage as Arc<dyn TokenStorage>)
        .build()
        .unwrap();

    client.search("x", &SearchOptions::default()).await.unwrap();
    client.search("y", &SearchOptions::default()).await.unwrap();

    assert_eq!(auth_requests(&server).await, 0);
}

#[tokio::test]
async fn test_stale_credential_triggers_new_exchange_and_persists() {
    let server = MockServer::start().await;

    // Expired 49 hours ago, past the 48 hour freshness window.
    let storage = Arc::new(MemoryTokenStorage::new());
    storage
        .save(&TokenInfo::new("old-token".into(), now() - 49 * 3600))
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("new-token"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/search"))
        .and(header("authorization", "Bearer new-token"))
        .respond_with(media_page())
        .mount(&server)
        .await;

    let client = MiraClient::builder()
        .base_url(server.uri())
        .api_key("test-api-key")
        .config_source(Arc::new(NoConfig))
        .storage(Arc::clone(&storage) as Arc<dyn TokenStorage>)
        .build()
        .unwrap();

    client.search("x", &SearchOptions::default()).await.unwrap();

    assert_eq!(auth_requests(&server).await, 1);
    let persisted = storage.load().await.unwrap().unwrap();
    assert_eq!(persisted.token, "new-token");
    assert!(persisted.expires_at > now());
}

#[tokio::test]
async fn test_failed_exchange_is_shared_and_sticky() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .search("x", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::ExchangeFailed(_))));

    // The failure sticks: no second exchange happens on the next fetch.
    let err = client
        .trending(&TrendingOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::ExchangeFailed(_))));
    assert_eq!(auth_requests(&server).await, 1);

    // An explicit authenticate re-opens the gate and tries again.
    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::ExchangeFailed(_))));
    assert_eq!(auth_requests(&server).await, 2);
}

#[tokio::test]
async fn test_trending_sends_cursor_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/trending"))
        .and(query_param("nextPageCursor", "cursor-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "media": [],
            "nextPageCursor": "cursor-43",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .trending(&TrendingOptions {
            next_page_cursor: Some("cursor-42".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(page.media.is_empty());
    assert_eq!(page.next_page_cursor.as_deref(), Some("cursor-43"));
}

#[tokio::test]
async fn test_media_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "media": { "id": "m1", "type": "photo" },
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let item = client.media_by_id("m1").await.unwrap();
    assert_eq!(item.id, "m1");
    assert_eq!(item.media_type, MediaType::Photo);
}

#[tokio::test]
async fn test_media_by_id_without_payload_is_missing_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.media_by_id("gone").await.unwrap_err();
    assert!(matches!(err, Error::MissingPayload));
}

#[tokio::test]
async fn test_exchange_expiry_is_anchored_at_issue_time() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/authenticate"))
        .respond_with(auth_ok("test-token"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.authenticate().await.unwrap();

    let credential = client.auth().credential().await.unwrap();
    assert_eq!(credential.token, "test-token");
    let delta = credential.expires_at - now();
    assert!((3590..=3610).contains(&delta), "unexpected expiry delta {delta}");
}
