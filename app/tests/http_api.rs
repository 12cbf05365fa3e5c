//! HTTP client behaviour against a local mock backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use annotator_app::api::{HttpPhotoApi, PhotoApi};
use annotator_app::config::ClientConfig;
use annotator_app::error::{ApiError, StorageError};
use annotator_app::mocks::{InMemoryStorage, TEST_SESSION_KEY};
use annotator_app::models::{Image, ImageId, ImageState, PaintImage, Search, SemanticCheckValue, Session, TagMode};
use annotator_app::session::{SessionStorage, SessionStore, StaticCookies, StorageFuture};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Backend {
    server: MockServer,
    storage: InMemoryStorage,
    api: HttpPhotoApi,
}

async fn backend(csrf: Option<&str>) -> Backend {
    let server = MockServer::start().await;
    let config = ClientConfig::default()
        .with_api_url(format!("{}/api/", server.uri()))
        .with_auth_url(format!("{}/auth/", server.uri()))
        .with_request_timeout(Duration::from_secs(5));
    let storage = InMemoryStorage::new();
    let sessions = SessionStore::new(Arc::new(storage.clone()), TEST_SESSION_KEY);
    let api = HttpPhotoApi::new(&config, sessions, Arc::new(StaticCookies::with_csrf(csrf))).unwrap();
    Backend { server, storage, api }
}

async fn log_in(storage: &InMemoryStorage, token: &str) {
    let sessions = SessionStore::new(Arc::new(storage.clone()), TEST_SESSION_KEY);
    sessions.save(&Session::new(token)).await.unwrap();
}

/// Storage whose reads wait until a permit is released.
struct GatedStorage {
    blob: String,
    open: Arc<Semaphore>,
}

impl SessionStorage for GatedStorage {
    fn get_item<'a>(&'a self, _key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let _permit = self.open.acquire().await.map_err(|_| StorageError::Unavailable)?;
            Ok(Some(self.blob.clone()))
        })
    }

    fn set_item<'a>(&'a self, _key: &'a str, _value: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn remove_item<'a>(&'a self, _key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(std::future::ready(Ok(())))
    }
}

#[tokio::test]
async fn slow_session_storage_delays_only_its_own_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/licenses/"))
        .and(header("Authorization", "Token abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 4, "name": "CC BY"}])))
        .expect(1)
        .mount(&server)
        .await;
    let config = ClientConfig::default()
        .with_api_url(format!("{}/api/", server.uri()))
        .with_request_timeout(Duration::from_secs(5));
    let open = Arc::new(Semaphore::new(0));
    let storage = GatedStorage {
        blob: r#"{"token":"abc"}"#.to_string(),
        open: Arc::clone(&open),
    };
    let sessions = SessionStore::new(Arc::new(storage), TEST_SESSION_KEY);
    let api = Arc::new(HttpPhotoApi::from_config(&config, sessions).unwrap());

    let pending = tokio::spawn({
        let api = Arc::clone(&api);
        async move { api.licenses().await }
    });

    // The executor keeps running other work while the token read waits
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!pending.is_finished());
    assert!(server.received_requests().await.unwrap().is_empty());

    open.add_permits(1);
    let licenses = pending.await.unwrap().unwrap();

    assert_eq!(licenses.len(), 1);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get("authorization").unwrap(), "Token abc");
}

#[tokio::test]
async fn auth_header_follows_the_stored_session() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/licenses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 4, "name": "CC BY"}])))
        .mount(&backend.server)
        .await;

    let anonymous = backend.api.licenses().await.unwrap();
    log_in(&backend.storage, "abc").await;
    let authorized = backend.api.licenses().await.unwrap();

    assert_eq!(anonymous, authorized);
    let requests = backend.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(requests[1].headers.get("authorization").unwrap(), "Token abc");
}

#[tokio::test]
async fn search_sends_the_expected_query() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .and(query_param("tags", "beach,-dog"))
        .and(query_param("license", "1,4"))
        .and(query_param("per_page", "20"))
        .and(query_param("page", "3"))
        .and(query_param("tag_mode", "any"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 42,
            "left": 40,
            "images": [{"id": "17", "title": "Sunset", "farm": "5", "ispublic": 1}],
            "page": 3,
            "perpage": 20,
            "cursor": 40
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let search = Search::new("beach")
        .with_exclude("dog")
        .with_licenses([4, 1])
        .with_per_page(20)
        .with_tag_mode(TagMode::Any);
    let page = backend.api.search(&search, 3).await.unwrap();

    assert_eq!(page.total, 42);
    assert_eq!(page.page, 3);
    assert_eq!(page.images.len(), 1);
    assert_eq!(page.images[0].title, "Sunset");
    assert_eq!(page.images[0].farm, 5);
    assert!(page.images[0].ispublic);

    let requests = backend.server.received_requests().await.unwrap();
    assert!(!requests[0].url.query_pairs().any(|(key, _)| key == "user_id"));
}

#[tokio::test]
async fn exhausted_search_is_an_empty_page() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"total": 10, "left": 0, "images": [], "page": 4})))
        .mount(&backend.server)
        .await;

    let page = backend.api.search(&Search::new("beach"), 4).await.unwrap();

    assert!(page.images.is_empty());
    assert_eq!(page.left, Some(0));
    assert_eq!(page.page, 4);
}

#[tokio::test]
async fn missing_resource_is_a_status_error() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/images/9/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found."))
        .mount(&backend.server)
        .await;

    let error = backend.api.image(&ImageId::from("9")).await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Status {
            status: 404,
            body: "Not found.".to_string(),
        }
    );
}

#[tokio::test]
async fn unauthorized_is_recognised() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/semantic-checks/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token."})))
        .mount(&backend.server)
        .await;

    let error = backend.api.semantic_checks().await.unwrap_err();
    assert!(error.is_unauthorized());
}

#[tokio::test]
async fn paginated_listing_is_unwrapped() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/images/"))
        .and(query_param("annotated_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 57,
            "next": "http://backend/api/images/?page=2",
            "previous": null,
            "results": [{"id": 3}, {"id": "4"}]
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let list = backend.api.images(ImageState::AnnotatedOnly).await.unwrap();

    assert_eq!(list.total, 57);
    assert_eq!(list.images, vec![Image::new("3"), Image::new("4")]);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let backend = backend(None).await;
    Mock::given(method("GET"))
        .and(path("/api/licenses/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&backend.server)
        .await;

    let error = backend.api.licenses().await.unwrap_err();
    assert!(matches!(error, ApiError::Decode(_)));
}

#[tokio::test]
async fn save_annotation_posts_a_data_uri_with_csrf() {
    let backend = backend(Some("csrf-1")).await;
    log_in(&backend.storage, "abc").await;
    Mock::given(method("POST"))
        .and(path("/api/annotations/"))
        .and(header("X-CSRFToken", "csrf-1"))
        .and(header("Authorization", "Token abc"))
        .and(body_json(json!({"image": "5", "paint_image": "data:image/png;base64,QUJD"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 21, "image": 5})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let saved = backend
        .api
        .save_annotation(&ImageId::from("5"), &PaintImage::new("QUJD"))
        .await
        .unwrap();

    assert_eq!(saved.id, Some(21));
    assert_eq!(saved.image, ImageId::from("5"));
}

#[tokio::test]
async fn semantic_checks_are_patched_onto_the_annotation() {
    let backend = backend(Some("csrf-1")).await;
    Mock::given(method("PATCH"))
        .and(path("/api/annotations/21/"))
        .and(body_json(json!({"semantic_checks": [{"semantic_check": 1, "value": 0.5}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 21, "image": "5", "semantic_checks": [1]})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let values = [SemanticCheckValue {
        semantic_check: 1,
        value: 0.5,
    }];
    let saved = backend.api.save_semantic_checks(21, &values).await.unwrap();

    assert_eq!(saved.semantic_checks, vec![1]);
}

#[tokio::test]
async fn login_returns_a_session_for_the_key() {
    let backend = backend(Some("csrf-1")).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(header("X-CSRFToken", "csrf-1"))
        .and(body_json(json!({"username": "ana", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "k-123"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let session = backend.api.login("ana", "secret").await.unwrap();

    assert_eq!(session, Session::new("k-123").with_username("ana"));
}

#[tokio::test]
async fn rejected_login_is_a_status_error() {
    let backend = backend(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"non_field_errors": ["Unable to log in."]})))
        .mount(&backend.server)
        .await;

    let error = backend.api.login("ana", "wrong").await.unwrap_err();
    assert!(matches!(error, ApiError::Status { status: 400, .. }));
}

#[tokio::test]
async fn logout_posts_to_the_auth_endpoint() {
    let backend = backend(None).await;
    log_in(&backend.storage, "abc").await;
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .and(header("Authorization", "Token abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend.api.logout().await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let config = ClientConfig::default()
        .with_api_url("http://127.0.0.1:9/api/")
        .with_request_timeout(Duration::from_secs(2));
    let sessions = SessionStore::new(Arc::new(InMemoryStorage::new()), TEST_SESSION_KEY);
    let api = HttpPhotoApi::from_config(&config, sessions).unwrap();

    let error = api.licenses().await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
}
