#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use codesphere_api::auth::jwt::{generate_access_token, JwtConfig};
use codesphere_api::config::ServerConfig;
use codesphere_api::router::build_app_router;
use codesphere_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the application router exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Mint a bearer token for `user_id` with the test secret.
pub fn bearer(user_id: &str) -> String {
    let token = generate_access_token(user_id, None, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn post_json_as(app: Router, uri: &str, body: Value, auth: &str) -> Response<Body> {
    json_request(app, Method::POST, uri, body, Some(auth)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: Value,
    auth: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a room and return its JSON.
pub async fn create_room(app: &Router, slug: &str) -> Value {
    let response = post_json(app.clone(), "/api/v1/rooms", serde_json::json!({"slug": slug})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a file in a room and return its JSON.
pub async fn create_file(app: &Router, slug: &str, body: Value) -> Value {
    let uri = format!("/api/v1/room/{slug}/files");
    let response = post_json(app.clone(), &uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Save new content for a file.
pub async fn save(app: &Router, file_id: i64, content: &str) {
    let uri = format!("/api/v1/files/{file_id}");
    let response = put_json(app.clone(), &uri, serde_json::json!({"content": content})).await;
    assert_eq!(response.status(), StatusCode::OK);
}
