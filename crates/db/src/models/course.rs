//! Course entity model and DTOs.

use cradle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub target_audience: String,
    pub description: String,
    pub benefits_mom: Option<String>,
    pub benefits_baby: Option<String>,
    pub price: f64,
    pub price_type: String,
    pub duration_minutes: i32,
    pub mode: String,
    pub status: String,
    pub featured: bool,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub instructor_id: Option<DbId>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course. Required fields are enforced at the JSON
/// boundary; enum fields fall back to their column defaults when `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub slug: String,
    pub title: String,
    pub target_audience: String,
    pub description: String,
    pub price: f64,
    pub duration_minutes: i32,
    pub benefits_mom: Option<String>,
    pub benefits_baby: Option<String>,
    pub price_type: Option<String>,
    pub mode: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub instructor_id: Option<DbId>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// DTO for partially updating a course. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub target_audience: Option<String>,
    pub description: Option<String>,
    pub benefits_mom: Option<String>,
    pub benefits_baby: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<String>,
    pub duration_minutes: Option<i32>,
    pub mode: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub instructor_id: Option<DbId>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// Filters accepted by the course list endpoint.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Case-insensitive match against title OR description.
    pub search: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub instructor_id: Option<DbId>,
}
