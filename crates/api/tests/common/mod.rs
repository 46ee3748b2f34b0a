//! Shared helpers for HTTP-level integration tests.
//!
//! Tests run against the same router + middleware stack as production via
//! [`build_test_app`], driven with `tower::ServiceExt::oneshot` so no
//! listener is needed.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cradle_api::auth::jwt::{generate_access_token, JwtConfig};
use cradle_api::auth::password::hash_password;
use cradle_api::config::ServerConfig;
use cradle_api::router::build_app_router;
use cradle_api::state::AppState;
use cradle_api::uploads::MaterialStore;
use cradle_core::roles::Role;
use cradle_db::models::user::{CreateUser, User};
use cradle_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        storage_root: storage_root.to_path_buf(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router against a throwaway storage root.
///
/// Use [`build_test_app_with_storage`] when the test needs to inspect the
/// files the server writes.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = tempfile::tempdir().expect("tempdir");
    // Leak the tempdir so it outlives the router; the OS reclaims it.
    let root = dir.keep();
    build_test_app_with_storage(pool, &root)
}

/// Build the application router storing uploads under `storage_root`.
pub fn build_test_app_with_storage(pool: PgPool, storage_root: &Path) -> Router {
    let config = test_config(storage_root);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        material_store: Arc::new(MaterialStore::new(storage_root.to_path_buf())),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    request(app, "GET", uri, None, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, "GET", uri, None, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, "POST", uri, Some(body.to_string()), None, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request(app, "POST", uri, Some(body.to_string()), None, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request(app, "PUT", uri, Some(body.to_string()), None, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, "DELETE", uri, None, None, Some(token)).await
}

async fn request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
    content_type: Option<&str>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if body.is_some() {
        builder = builder.header("content-type", content_type.unwrap_or("application/json"));
    }
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("request should build");

    app.oneshot(request).await.expect("request should complete")
}

/// Read a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "X-CRADLE-TEST-BOUNDARY";

/// A single part of a test multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Assemble a `multipart/form-data` body from the given parts.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Send a multipart request with an auth token.
pub async fn send_multipart(
    app: Router,
    method: &str,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response<Body> {
    let (content_type, body) = multipart_body(parts);

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("request should build");

    app.oneshot(request).await.expect("request should complete")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return the row plus a valid
/// access token for it.
pub async fn seed_user(pool: &PgPool, username: &str, role: Role) -> (User, String) {
    let hashed = hash_password("test_password_123!").expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        role: role.as_str().to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");

    let jwt = test_config(Path::new("/tmp")).jwt;
    let token =
        generate_access_token(user.id, role.as_str(), &jwt).expect("token generation");

    (user, token)
}

/// Create a course through the API and return its id.
pub async fn seed_course(app: Router, token: &str, slug: &str) -> i64 {
    let body = serde_json::json!({
        "slug": slug,
        "title": "Infant Sleep Basics",
        "target_audience": "new-parents",
        "description": "A gentle introduction to infant sleep routines.",
        "price": 49.0,
        "duration_minutes": 90,
    });
    let response = post_json_auth(app, "/api/v1/courses", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("course id")
}
