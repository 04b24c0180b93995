mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::*;
use serde_json::json;
use users_api::app::BODY_LIMIT_BYTES;
use users_api::Environment;

#[tokio::test]
async fn health_and_ready_report_ok() {
    let app = test_app().await;
    let res = get(&app, "/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "message": "API is up and running" }));

    let res = get(&app, "/ready").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "message": "ok" }));
}

#[tokio::test]
async fn unknown_route_names_the_path() {
    let app = test_app().await;
    let res = get(&app, "/nope/here").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json(), json!({ "message": "Not Found - /nope/here" }));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app().await;
    let res = send_raw(&app, Method::POST, "/users", "{not json").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["message"].is_string());
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = test_app().await;
    let body = json!({
        "email": "big@example.com",
        "firstName": "x".repeat(BODY_LIMIT_BYTES + 1),
        "lastName": "Doe",
    });
    let res = send_json(&app, Method::POST, "/users", &body).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(get(&app, "/users").await.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let app = test_app().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .body(Body::from(ada().to_string()))
        .unwrap();
    let res = send(&app, req).await;
    assert_eq!(res.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(res.json()["message"].as_str().unwrap().contains("Content-Type"));
}

#[tokio::test]
async fn non_object_body_is_a_validation_error() {
    let app = test_app().await;
    let res = send_json(&app, Method::POST, "/users", &json!([1, 2])).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let issue = &res.json()["error"]["issues"][0];
    assert_eq!(issue["code"], "invalid_type");
    assert_eq!(issue["path"], json!([]));
}

#[tokio::test]
async fn stack_is_shown_outside_production() {
    let app = test_app_in(Environment::Development).await;
    create_user(&app, &ada()).await;
    let res = send_json(&app, Method::POST, "/users", &ada()).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    let body = res.json();
    assert!(body["stack"].as_str().unwrap().starts_with("Error: "));
}

#[tokio::test]
async fn stack_is_withheld_in_production() {
    let app = test_app_in(Environment::Production).await;
    create_user(&app, &ada()).await;
    let res = send_json(&app, Method::POST, "/users", &ada()).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    let body = res.json();
    assert_eq!(body["message"], "A user with this email already exists");
    assert!(body.get("stack").is_none());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = test_app().await;
    let res = get(&app, "/health").await;
    let id = res.headers["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}
