//! Repository for the `courses` table.

use cradle_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseFilter, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, title, target_audience, description, benefits_mom, \
    benefits_baby, price, price_type, duration_minutes, mode, status, featured, \
    thumbnail_url, video_url, instructor_id, seo_title, seo_description, \
    created_at, updated_at";

/// Shared filter clause for list + count. `$1..$4` are nullable filter
/// binds; a NULL bind disables its filter.
const FILTER_CLAUSE: &str = "($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1) \
    AND ($2::text IS NULL OR status = $2) \
    AND ($3::boolean IS NULL OR featured = $3) \
    AND ($4::bigint IS NULL OR instructor_id = $4)";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// List courses matching `filter`, newest-created first, returning the
    /// requested page and the total row count for the filter.
    pub async fn list(
        pool: &PgPool,
        filter: &CourseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Course>, i64), sqlx::Error> {
        let search_pattern = filter.search.as_ref().map(|s| format!("%{s}%"));

        let list_query = format!(
            "SELECT {COLUMNS} FROM courses WHERE {FILTER_CLAUSE} \
             ORDER BY created_at DESC, id DESC LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, Course>(&list_query)
            .bind(&search_pattern)
            .bind(&filter.status)
            .bind(filter.featured)
            .bind(filter.instructor_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM courses WHERE {FILTER_CLAUSE}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&search_pattern)
            .bind(&filter.status)
            .bind(filter.featured)
            .bind(filter.instructor_id)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Find a course by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a course with `slug` exists, excluding `exclude_id` when
    /// given (used by the update path's re-check).
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Insert a new course, returning the created row. Enum fields fall
    /// back to their column defaults when `None`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses \
                (slug, title, target_audience, description, benefits_mom, benefits_baby, \
                 price, price_type, duration_minutes, mode, status, featured, \
                 thumbnail_url, video_url, instructor_id, seo_title, seo_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'one-off'), $9, \
                     COALESCE($10, 'group'), COALESCE($11, 'draft'), COALESCE($12, false), \
                     $13, $14, $15, $16, $17) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.target_audience)
            .bind(&input.description)
            .bind(&input.benefits_mom)
            .bind(&input.benefits_baby)
            .bind(input.price)
            .bind(&input.price_type)
            .bind(input.duration_minutes)
            .bind(&input.mode)
            .bind(&input.status)
            .bind(input.featured)
            .bind(&input.thumbnail_url)
            .bind(&input.video_url)
            .bind(input.instructor_id)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_one(pool)
            .await
    }

    /// Update a course. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                slug = COALESCE($2, slug), \
                title = COALESCE($3, title), \
                target_audience = COALESCE($4, target_audience), \
                description = COALESCE($5, description), \
                benefits_mom = COALESCE($6, benefits_mom), \
                benefits_baby = COALESCE($7, benefits_baby), \
                price = COALESCE($8, price), \
                price_type = COALESCE($9, price_type), \
                duration_minutes = COALESCE($10, duration_minutes), \
                mode = COALESCE($11, mode), \
                status = COALESCE($12, status), \
                featured = COALESCE($13, featured), \
                thumbnail_url = COALESCE($14, thumbnail_url), \
                video_url = COALESCE($15, video_url), \
                instructor_id = COALESCE($16, instructor_id), \
                seo_title = COALESCE($17, seo_title), \
                seo_description = COALESCE($18, seo_description), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.target_audience)
            .bind(&input.description)
            .bind(&input.benefits_mom)
            .bind(&input.benefits_baby)
            .bind(input.price)
            .bind(&input.price_type)
            .bind(input.duration_minutes)
            .bind(&input.mode)
            .bind(&input.status)
            .bind(input.featured)
            .bind(&input.thumbnail_url)
            .bind(&input.video_url)
            .bind(input.instructor_id)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a course. Child rows (modules, sessions, materials) go
    /// via `ON DELETE CASCADE`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
