//! HTTP-level integration tests for course sessions.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, seed_course, seed_user};
use cradle_core::roles::Role;
use sqlx::PgPool;

fn session_payload() -> serde_json::Value {
    serde_json::json!({
        "start_time": "2026-09-01T10:00:00Z",
        "end_time": "2026-09-01T11:30:00Z",
        "location": "Studio 2",
        "meeting_type": "offline",
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_session_applies_defaults(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/sessions"),
        session_payload(),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["capacity"], 10);
    assert_eq!(json["data"]["enrolled_count"], 0);
    assert_eq!(json["data"]["status"], "scheduled");
}

/// Time ranges and capacity are stored as given; the handlers do not
/// second-guess them.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_session_stores_times_and_capacity_as_given(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let mut body = session_payload();
    body["end_time"] = serde_json::json!("2026-09-01T09:00:00Z");
    body["capacity"] = serde_json::json!(0);
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/sessions"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["end_time"], "2026-09-01T09:00:00Z");
    assert_eq!(json["data"]["capacity"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_session_rejects_unknown_meeting_type(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let mut body = session_payload();
    body["meeting_type"] = serde_json::json!("teams");
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/sessions"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_moves_one_end_of_the_range(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/sessions"),
        session_payload(),
        &token,
    )
    .await;
    let session_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Only the end moves; the stored start is untouched, even though the
    // new end now precedes it.
    let body = serde_json::json!({ "end_time": "2026-09-01T09:00:00Z" });
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/sessions/{session_id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["start_time"], "2026-09-01T10:00:00Z");
    assert_eq!(json["data"]["end_time"], "2026-09-01T09:00:00Z");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_set_status_validates_value(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/sessions"),
        session_payload(),
        &token,
    )
    .await;
    let session_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "status": "cancelled" });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/sessions/{session_id}/status"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "cancelled");

    // Any-to-any transitions are allowed, but unknown values are not.
    let body = serde_json::json!({ "status": "postponed" });
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/sessions/{session_id}/status"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_session_delete_and_listing(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/sessions"),
        session_payload(),
        &token,
    )
    .await;
    let session_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/sessions"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/sessions/{session_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/sessions/{session_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
