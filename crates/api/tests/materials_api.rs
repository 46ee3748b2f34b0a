//! HTTP-level integration tests for material uploads, including the
//! staged-upload cleanup guarantees.

mod common;

use std::path::Path;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, seed_course, seed_user, send_multipart, Part,
};
use cradle_core::roles::Role;
use sqlx::PgPool;

const PDF_BYTES: &[u8] = b"%PDF-1.4 fake but good enough";

fn upload_parts<'a>(title: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("title", title),
        Part::File {
            name: "file",
            filename: "birth-plan.pdf",
            content_type: "application/pdf",
            data: PDF_BYTES,
        },
    ]
}

/// Files currently present under the storage root.
fn stored_files(root: &Path) -> Vec<String> {
    std::fs::read_dir(root)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_material_success(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("Birth Plan Template"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Birth Plan Template");
    assert_eq!(json["data"]["mime_type"], "application/pdf");
    assert_eq!(json["data"]["size_bytes"], PDF_BYTES.len() as i64);
    assert_eq!(json["data"]["visibility"], "enrolled");

    let file_key = json["data"]["file_key"].as_str().unwrap();
    assert_eq!(
        json["data"]["file_url"].as_str().unwrap(),
        format!("/uploads/materials/{file_key}")
    );
    assert!(
        storage.path().join(file_key).exists(),
        "committed upload must be on disk"
    );
}

/// A rejected upload leaves nothing behind in the storage root.
#[sqlx::test(migrations = "../../migrations")]
async fn test_rejected_mime_type_leaves_no_file(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let parts = vec![
        Part::Text("title", "Sneaky Binary"),
        Part::File {
            name: "file",
            filename: "tool.exe",
            content_type: "application/x-msdownload",
            data: b"MZ",
        },
    ];
    let response = send_multipart(
        common::build_test_app_with_storage(pool, storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &parts,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stored_files(storage.path()).is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_missing_title_leaves_no_file(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let parts = vec![Part::File {
        name: "file",
        filename: "notes.pdf",
        content_type: "application/pdf",
        data: PDF_BYTES,
    }];
    let response = send_multipart(
        common::build_test_app_with_storage(pool, storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &parts,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stored_files(storage.path()).is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upload_to_missing_course_leaves_no_file(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool, storage.path()),
        "POST",
        "/api/v1/courses/9999/materials",
        &upload_parts("Orphan"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(stored_files(storage.path()).is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_student_cannot_upload(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_admin, admin_token) = seed_user(&pool, "root", Role::Admin).await;
    let (_student, student_token) = seed_user(&pool, "learner", Role::Student).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &admin_token,
        "c1",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool, storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("Not Allowed"),
        &student_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(stored_files(storage.path()).is_empty());
}

/// Replacing the file swaps the stored object and removes the old one.
#[sqlx::test(migrations = "../../migrations")]
async fn test_update_replaces_stored_file(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("v1"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let material_id = json["data"]["id"].as_i64().unwrap();
    let old_key = json["data"]["file_key"].as_str().unwrap().to_string();

    let parts = vec![
        Part::Text("title", "v2"),
        Part::File {
            name: "file",
            filename: "revised.pdf",
            content_type: "application/pdf",
            data: b"%PDF-1.4 revised",
        },
    ];
    let response = send_multipart(
        common::build_test_app_with_storage(pool, storage.path()),
        "PUT",
        &format!("/api/v1/courses/{course_id}/materials/{material_id}"),
        &parts,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "v2");

    let new_key = json["data"]["file_key"].as_str().unwrap();
    assert_ne!(new_key, old_key);
    assert!(storage.path().join(new_key).exists());
    assert!(!storage.path().join(&old_key).exists(), "old file removed");
}

/// Metadata-only update keeps the stored file untouched.
#[sqlx::test(migrations = "../../migrations")]
async fn test_update_metadata_only(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("Original"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let material_id = json["data"]["id"].as_i64().unwrap();
    let file_key = json["data"]["file_key"].as_str().unwrap().to_string();

    let parts = vec![Part::Text("visibility", "public")];
    let response = send_multipart(
        common::build_test_app_with_storage(pool, storage.path()),
        "PUT",
        &format!("/api/v1/courses/{course_id}/materials/{material_id}"),
        &parts,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["visibility"], "public");
    assert_eq!(json["data"]["title"], "Original");
    assert_eq!(json["data"]["file_key"], file_key);
    assert!(storage.path().join(&file_key).exists());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_material_removes_file_and_row(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("Doomed"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let material_id = json["data"]["id"].as_i64().unwrap();
    let file_key = json["data"]["file_key"].as_str().unwrap().to_string();

    let response = delete_auth(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &format!("/api/v1/courses/{course_id}/materials/{material_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!storage.path().join(&file_key).exists());

    let response = get(
        common::build_test_app_with_storage(pool, storage.path()),
        &format!("/api/v1/courses/{course_id}/materials/{material_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a course best-effort removes its stored material files.
#[sqlx::test(migrations = "../../migrations")]
async fn test_course_delete_cleans_material_files(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("Handout"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(stored_files(storage.path()).len(), 1);

    let response = delete_auth(
        common::build_test_app_with_storage(pool, storage.path()),
        &format!("/api/v1/courses/{course_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(stored_files(storage.path()).is_empty());
}

/// A material cannot be deleted through a course it does not belong to;
/// the row and the stored file both survive the attempt.
#[sqlx::test(migrations = "../../migrations")]
async fn test_material_not_deletable_via_other_course(pool: PgPool) {
    let storage = tempfile::tempdir().expect("tempdir");
    let (_user, token) = seed_user(&pool, "root", Role::Admin).await;
    let course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c1",
    )
    .await;
    let other_course_id = seed_course(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &token,
        "c2",
    )
    .await;

    let response = send_multipart(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        "POST",
        &format!("/api/v1/courses/{course_id}/materials"),
        &upload_parts("Keeper"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let material_id = json["data"]["id"].as_i64().unwrap();
    let file_key = json["data"]["file_key"].as_str().unwrap().to_string();

    let response = delete_auth(
        common::build_test_app_with_storage(pool.clone(), storage.path()),
        &format!("/api/v1/courses/{other_course_id}/materials/{material_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(storage.path().join(&file_key).exists());

    // Still reachable through its own course.
    let response = get(
        common::build_test_app_with_storage(pool, storage.path()),
        &format!("/api/v1/courses/{course_id}/materials/{material_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
