//! HTTP-level integration tests for course modules, including the bulk
//! reorder endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, seed_course, seed_user};
use cradle_core::roles::Role;
use sqlx::PgPool;

async fn add_module(pool: &PgPool, token: &str, course_id: i64, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/modules"),
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_module_crud(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let module_id = add_module(&pool, &token, course_id, "Week 1: Settling In").await;

    let body = serde_json::json!({ "description": "Feeding and sleep cues", "duration_minutes": 45 });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/modules/{module_id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Week 1: Settling In");
    assert_eq!(json["data"]["duration_minutes"], 45);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/modules/{module_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/modules/{module_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_module_create_blank_title_rejected(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let body = serde_json::json!({ "title": "" });
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/modules"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_module_create_missing_course_404(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;

    let body = serde_json::json!({ "title": "Orphan" });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/courses/9999/modules",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A module is only addressable through its own course.
#[sqlx::test(migrations = "../../migrations")]
async fn test_module_not_reachable_via_other_course(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_a = seed_course(common::build_test_app(pool.clone()), &token, "a").await;
    let course_b = seed_course(common::build_test_app(pool.clone()), &token, "b").await;

    let module_id = add_module(&pool, &token, course_a, "Belongs to A").await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_b}/modules/{module_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reorder_rewrites_sort_order(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let first = add_module(&pool, &token, course_id, "First").await;
    let second = add_module(&pool, &token, course_id, "Second").await;
    let third = add_module(&pool, &token, course_id, "Third").await;

    let body = serde_json::json!({ "module_ids": [third, first, second] });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/modules/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third", "First", "Second"]);

    // The list endpoint reflects the new order.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/modules"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], third);
    assert_eq!(json["data"][0]["sort_order"], 0);
}

/// Module ids belonging to another course are ignored by the reorder.
#[sqlx::test(migrations = "../../migrations")]
async fn test_reorder_skips_foreign_modules(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_a = seed_course(common::build_test_app(pool.clone()), &token, "a").await;
    let course_b = seed_course(common::build_test_app(pool.clone()), &token, "b").await;

    let mine = add_module(&pool, &token, course_a, "Mine").await;
    let foreign = add_module(&pool, &token, course_b, "Foreign").await;

    let body = serde_json::json!({ "module_ids": [foreign, mine] });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_a}/modules/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Only course A's module comes back; the foreign one is untouched.
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], mine);
    assert_eq!(json["data"][0]["sort_order"], 1);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_b}/modules/{foreign}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["sort_order"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reorder_empty_list_rejected(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(common::build_test_app(pool.clone()), &token, "c1").await;

    let body = serde_json::json!({ "module_ids": [] });
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/modules/reorder"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
