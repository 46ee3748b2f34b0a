//! Course material (uploaded file) model and DTOs.

use cradle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `course_materials` table.
///
/// `download_count` is carried with its stored default; nothing in this
/// service increments it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub file_key: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub visibility: String,
    pub provider: String,
    pub download_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a material record alongside a committed upload.
/// Built by the handler from the multipart fields + staged file metadata,
/// not deserialized directly from a request body.
#[derive(Debug, Clone)]
pub struct CreateMaterial {
    pub course_id: DbId,
    pub title: String,
    pub file_key: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub visibility: Option<String>,
}

/// DTO for updating a material's metadata (no file replacement).
#[derive(Debug, Clone, Default)]
pub struct UpdateMaterial {
    pub title: Option<String>,
    pub visibility: Option<String>,
}

/// DTO for swapping in a newly uploaded file on update.
#[derive(Debug, Clone)]
pub struct ReplaceMaterialFile {
    pub file_key: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: i64,
}
