//! Course module (ordered content unit) model and DTOs.

use cradle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `course_modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseModule {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a module to a course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseModule {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a module. Omitted fields keep their value, which
/// protects against accidentally nulling fields absent from the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseModule {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: Option<i32>,
}
