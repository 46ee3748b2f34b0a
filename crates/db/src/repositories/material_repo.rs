//! Repository for the `course_materials` table.

use cradle_core::types::DbId;
use sqlx::PgPool;

use crate::models::material::{CreateMaterial, Material, ReplaceMaterialFile, UpdateMaterial};

const COLUMNS: &str = "id, course_id, title, file_key, file_url, mime_type, size_bytes, \
    visibility, provider, download_count, created_at, updated_at";

/// Provides CRUD operations for course materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// List all materials for a course, newest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_materials WHERE course_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Find a material by `(id, course_id)`.
    pub async fn find_by_id(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM course_materials WHERE id = $1 AND course_id = $2");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a material record for a committed upload.
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_materials \
                (course_id, title, file_key, file_url, mime_type, size_bytes, visibility) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'enrolled')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.file_key)
            .bind(&input.file_url)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(&input.visibility)
            .fetch_one(pool)
            .await
    }

    /// Update a material's metadata (title/visibility). Only non-`None`
    /// fields are applied. Returns `None` on id/course mismatch.
    pub async fn update(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE course_materials SET \
                title = COALESCE($3, title), \
                visibility = COALESCE($4, visibility), \
                updated_at = now() \
             WHERE id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(course_id)
            .bind(&input.title)
            .bind(&input.visibility)
            .fetch_optional(pool)
            .await
    }

    /// Swap in a newly uploaded file, optionally updating metadata in the
    /// same statement. Returns `None` on id/course mismatch.
    pub async fn replace_file(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
        file: &ReplaceMaterialFile,
        meta: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE course_materials SET \
                file_key = $3, \
                file_url = $4, \
                mime_type = $5, \
                size_bytes = $6, \
                title = COALESCE($7, title), \
                visibility = COALESCE($8, visibility), \
                updated_at = now() \
             WHERE id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(course_id)
            .bind(&file.file_key)
            .bind(&file.file_url)
            .bind(&file.mime_type)
            .bind(file.size_bytes)
            .bind(&meta.title)
            .bind(&meta.visibility)
            .fetch_optional(pool)
            .await
    }

    /// Delete a material row by `(id, course_id)`. Returns `true` if
    /// deleted. File removal is the caller's concern and happens first.
    pub async fn delete(pool: &PgPool, course_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM course_materials WHERE id = $1 AND course_id = $2")
            .bind(id)
            .bind(course_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
