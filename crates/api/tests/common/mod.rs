#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use inotebook_api::auth::jwt::TokenConfig;
use inotebook_api::config::ServerConfig;
use inotebook_api::router::build_app_router;
use inotebook_api::state::AppState;
use inotebook_db::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        cookie_secure: false,
        ledger_purge_interval_secs: 3600,
        jwt: TokenConfig {
            access_secret: "test-access-secret-long-enough-for-hmac".to_string(),
            refresh_secret: "test-refresh-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 15,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The returned store shares its tables with the router, so tests can
/// inspect the ledger and note rows directly.
pub fn build_test_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::in_memory(test_config(), store.clone())
        .expect("in-memory state should build");
    (build_app_router(state, &test_config()), store)
}

/// Build the full application router over an already assembled state.
pub fn build_app_with_state(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

/// Send a request with an optional JSON body and extra headers.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, &[]).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), &[]).await
}

/// POST with the `accessToken` header and no body.
pub async fn post_with_access(app: Router, uri: &str, access_token: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, &[("accessToken", access_token)]).await
}

/// POST with the refresh-token cookie and no body.
pub async fn post_with_refresh(app: Router, uri: &str, refresh_token: &str) -> Response<Body> {
    let cookie = format!("refreshToken={refresh_token}");
    send(app, Method::POST, uri, None, &[(COOKIE.as_str(), cookie.as_str())]).await
}

/// Collect the raw response body.
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Collect the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The raw `Set-Cookie` header, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// The value of the `refreshToken` cookie set by a response.
pub fn refresh_cookie_value(response: &Response<Body>) -> Option<String> {
    set_cookie(response)?
        .split(';')
        .next()?
        .strip_prefix("refreshToken=")
        .map(str::to_string)
}

/// Sign up through the API and return `(user_id, access_token, refresh_token)`.
pub async fn signup(app: Router, name: &str, email: &str) -> (i64, String, String) {
    let body = serde_json::json!({ "name": name, "email": email, "password": "Str0ng!Pass" });
    let response = post_json(app, "/api/auth/createUser", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["user"]["id"].as_i64().unwrap(),
        json["accessToken"].as_str().unwrap().to_string(),
        json["refreshToken"].as_str().unwrap().to_string(),
    )
}
