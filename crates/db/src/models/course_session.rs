//! Course session (scheduled meeting) model and DTOs.

use cradle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `course_sessions` table.
///
/// `enrolled_count` is carried with its stored default; no code path in
/// this service mutates it (enrollment lives outside this backend).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseSession {
    pub id: DbId,
    pub course_id: DbId,
    pub instructor_id: Option<DbId>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: Option<String>,
    pub capacity: i32,
    pub enrolled_count: i32,
    pub status: String,
    pub meeting_link: Option<String>,
    pub meeting_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for scheduling a session. Capacity defaults to 10, status to
/// `scheduled`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseSession {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub instructor_id: Option<DbId>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub meeting_link: Option<String>,
    pub meeting_type: Option<String>,
}

/// DTO for updating a session. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseSession {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub instructor_id: Option<DbId>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub meeting_link: Option<String>,
    pub meeting_type: Option<String>,
}
