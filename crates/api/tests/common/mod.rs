#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use vows_api::auth::jwt::JwtConfig;
use vows_api::config::ServerConfig;
use vows_api::router::build_app_router;
use vows_api::state::AppState;
use vows_core::storage::MemoryStorage;
use vows_db::memory::MemoryStore;
use vows_db::Repositories;

pub const ADMIN_EMAIL: &str = "admin@studio.test";
pub const PASSWORD: &str = "casamento-2025";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        whatsapp_number: "5547999990000".to_string(),
        media_dir: PathBuf::from("target/test-media"),
        media_base_url: "http://localhost/media".to_string(),
        admin_emails: vec![ADMIN_EMAIL.to_string()],
    }
}

/// The router plus handles on the in-memory backends behind it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub repos: Repositories,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router over in-memory repositories and storage.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) is exercised too.
pub fn build_test_app() -> TestApp {
    let config = Arc::new(test_config());
    let store = Arc::new(MemoryStore::new());
    let repos = Repositories::from_memory(store.clone());
    let storage = Arc::new(MemoryStorage::new());

    let state = AppState::new(repos.clone(), storage.clone(), Arc::clone(&config), None);
    let router = build_app_router(state, &config);

    TestApp {
        router,
        store,
        repos,
        storage,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request("GET", uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request("GET", uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request("DELETE", uri, Some(token), None)).await
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Sign up `email` and return the auth response body.
pub async fn signup(app: Router, email: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Access token for a freshly signed-up administrator.
pub async fn admin_token(test: &TestApp) -> String {
    let json = signup(test.app(), ADMIN_EMAIL).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Access token for a freshly signed-up non-admin user.
pub async fn user_token(test: &TestApp, email: &str) -> String {
    let json = signup(test.app(), email).await;
    json["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

pub const BOUNDARY: &str = "vows-test-boundary";

/// A file part for [`multipart_body`]: `(file_name, content_type, bytes)`.
pub type Part<'a> = (&'a str, &'a str, Vec<u8>);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload_photos(app: Router, wedding_id: i64, parts: &[Part<'_>], token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/admin/weddings/{wedding_id}/photos"))
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

/// Create a wedding through the API and return its id.
pub async fn create_wedding(app: Router, token: &str, couple_names: &str) -> i64 {
    let body = serde_json::json!({ "couple_names": couple_names, "city": "Joinville" });
    let response = post_json_auth(app, "/api/v1/admin/weddings", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
