//! Repository for the `course_sessions` table.

use cradle_core::session::DEFAULT_SESSION_CAPACITY;
use cradle_core::types::DbId;
use sqlx::PgPool;

use crate::models::course_session::{CourseSession, CreateCourseSession, UpdateCourseSession};

const COLUMNS: &str = "id, course_id, instructor_id, start_time, end_time, location, \
    capacity, enrolled_count, status, meeting_link, meeting_type, created_at, updated_at";

/// Provides CRUD operations for course sessions.
pub struct CourseSessionRepo;

impl CourseSessionRepo {
    /// List all sessions for a course, soonest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_sessions WHERE course_id = $1 \
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, CourseSession>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Find a session by `(id, course_id)`.
    pub async fn find_by_id(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
    ) -> Result<Option<CourseSession>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM course_sessions WHERE id = $1 AND course_id = $2");
        sqlx::query_as::<_, CourseSession>(&query)
            .bind(id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new session. Capacity defaults to 10, status to
    /// `scheduled` (column defaults).
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        input: &CreateCourseSession,
    ) -> Result<CourseSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_sessions \
                (course_id, instructor_id, start_time, end_time, location, capacity, \
                 meeting_link, meeting_type) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, {DEFAULT_SESSION_CAPACITY}), $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseSession>(&query)
            .bind(course_id)
            .bind(input.instructor_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(&input.meeting_link)
            .bind(&input.meeting_type)
            .fetch_one(pool)
            .await
    }

    /// Update a session by `(id, course_id)`. Only non-`None` fields are
    /// applied. Returns `None` on id/course mismatch.
    pub async fn update(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
        input: &UpdateCourseSession,
    ) -> Result<Option<CourseSession>, sqlx::Error> {
        let query = format!(
            "UPDATE course_sessions SET \
                instructor_id = COALESCE($3, instructor_id), \
                start_time = COALESCE($4, start_time), \
                end_time = COALESCE($5, end_time), \
                location = COALESCE($6, location), \
                capacity = COALESCE($7, capacity), \
                meeting_link = COALESCE($8, meeting_link), \
                meeting_type = COALESCE($9, meeting_type), \
                updated_at = now() \
             WHERE id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseSession>(&query)
            .bind(id)
            .bind(course_id)
            .bind(input.instructor_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(&input.meeting_link)
            .bind(&input.meeting_type)
            .fetch_optional(pool)
            .await
    }

    /// Set a session's status. The value is validated by the handler;
    /// transitions are unrestricted. Returns `None` on id/course mismatch.
    pub async fn set_status(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
        status: &str,
    ) -> Result<Option<CourseSession>, sqlx::Error> {
        let query = format!(
            "UPDATE course_sessions SET status = $3, updated_at = now() \
             WHERE id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseSession>(&query)
            .bind(id)
            .bind(course_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a session by `(id, course_id)`. Returns `true` if deleted.
    pub async fn delete(pool: &PgPool, course_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM course_sessions WHERE id = $1 AND course_id = $2")
            .bind(id)
            .bind(course_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
