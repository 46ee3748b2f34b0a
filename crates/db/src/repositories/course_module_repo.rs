//! Repository for the `course_modules` table.
//!
//! All single-row lookups filter by `(id, course_id)` so a module is only
//! addressable through its own course.

use cradle_core::types::DbId;
use sqlx::PgPool;

use crate::models::course_module::{CourseModule, CreateCourseModule, UpdateCourseModule};

const COLUMNS: &str =
    "id, course_id, title, description, duration_minutes, sort_order, created_at, updated_at";

/// Provides CRUD and bulk-reorder operations for course modules.
pub struct CourseModuleRepo;

impl CourseModuleRepo {
    /// List all modules for a course, ordered by `sort_order` ascending.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseModule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_modules WHERE course_id = $1 \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Find a module by `(id, course_id)`.
    pub async fn find_by_id(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
    ) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM course_modules WHERE id = $1 AND course_id = $2");
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new module. `sort_order` defaults to 0.
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        input: &CreateCourseModule,
    ) -> Result<CourseModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_modules (course_id, title, description, duration_minutes, sort_order) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a module by `(id, course_id)`. Only non-`None` fields are
    /// applied. Returns `None` on id/course mismatch.
    pub async fn update(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
        input: &UpdateCourseModule,
    ) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!(
            "UPDATE course_modules SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                duration_minutes = COALESCE($5, duration_minutes), \
                sort_order = COALESCE($6, sort_order), \
                updated_at = now() \
             WHERE id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(id)
            .bind(course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a module by `(id, course_id)`. Returns `true` if deleted.
    pub async fn delete(pool: &PgPool, course_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM course_modules WHERE id = $1 AND course_id = $2")
            .bind(id)
            .bind(course_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rewrite every listed module's `sort_order` to its position in
    /// `module_ids`, inside one transaction so a partial failure rolls
    /// back. Ids that do not belong to `course_id` affect zero rows and
    /// are skipped. Returns all modules in the new order.
    pub async fn reorder(
        pool: &PgPool,
        course_id: DbId,
        module_ids: &[DbId],
    ) -> Result<Vec<CourseModule>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, module_id) in module_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE course_modules SET sort_order = $3, updated_at = now() \
                 WHERE id = $1 AND course_id = $2",
            )
            .bind(module_id)
            .bind(course_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM course_modules WHERE course_id = $1 \
             ORDER BY sort_order ASC, id ASC"
        );
        let modules = sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(modules)
    }
}
