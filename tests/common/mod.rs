#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use users_api::{apply_migrations, create_app, AppConfig, AppState, Environment, UserStore};

pub const IN_MEMORY_URL: &str = "sqlite::memory:";

pub fn test_config(environment: Environment) -> AppConfig {
    AppConfig {
        environment,
        database_url: IN_MEMORY_URL.into(),
        ..AppConfig::default()
    }
}

/// Fresh app over its own in-memory database.
pub async fn test_app_in(environment: Environment) -> Router {
    let config = test_config(environment);
    let store = UserStore::connect(&config).await.expect("connect");
    apply_migrations(store.pool()).await.expect("migrate");
    create_app(AppState::new(store, config))
}

pub async fn test_app() -> Router {
    test_app_in(Environment::Test).await
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.expect("infallible");
    let status = res.status();
    let headers = res.headers().clone();
    let body = to_bytes(res.into_body(), usize::MAX).await.expect("body").to_vec();
    TestResponse { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder().uri(uri).body(Body::empty()).expect("request");
    send(app, req).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, req).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: &Value) -> TestResponse {
    send_raw(app, method, uri, body.to_string()).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request");
    send(app, req).await
}

pub fn ada() -> Value {
    json!({ "email": "ada@example.com", "firstName": "Ada", "lastName": "Lovelace" })
}

/// Create a user and return the stored record.
pub async fn create_user(app: &Router, body: &Value) -> Value {
    let res = send_json(app, Method::POST, "/users", body).await;
    assert_eq!(res.status, StatusCode::OK, "create failed: {}", res.text());
    res.json()
}
