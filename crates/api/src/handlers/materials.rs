//! Handlers for course materials, nested under `/courses/{course_id}/materials`.
//!
//! Uploads arrive as multipart forms. The file is written to the material
//! store as a staged upload after all validation passes; the staged guard
//! is only committed once the database row exists, so any later failure
//! (including a database error) removes the file again on drop.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use cradle_core::course::require_non_blank;
use cradle_core::error::CoreError;
use cradle_core::types::DbId;
use cradle_core::uploads::{validate_mime_type, validate_upload_size, validate_visibility};
use cradle_db::models::material::{
    CreateMaterial, Material, ReplaceMaterialFile, UpdateMaterial,
};
use cradle_db::repositories::{CourseRepo, MaterialRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCourseManager;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::uploads::MaterialStore;

/// Parsed multipart form for material create and update.
#[derive(Debug, Default)]
struct MaterialForm {
    title: Option<String>,
    visibility: Option<String>,
    file: Option<UploadedFile>,
}

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    mime_type: String,
    data: Vec<u8>,
}

/// GET /api/v1/courses/{course_id}/materials
///
/// List a course's materials, newest first.
pub async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Material>>>> {
    ensure_course_exists(&state, course_id).await?;
    let materials = MaterialRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: materials }))
}

/// GET /api/v1/courses/{course_id}/materials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Material>>> {
    let material = MaterialRepo::find_by_id(&state.pool, course_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok(Json(DataResponse { data: material }))
}

/// POST /api/v1/courses/{course_id}/materials
///
/// Upload a material. Multipart fields: `file` (required), `title`
/// (required), `visibility` (optional). Validation happens before any
/// bytes reach disk, so a rejected upload leaves nothing behind.
pub async fn upload(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(course_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Material>>)> {
    let form = parse_material_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let title = form
        .title
        .ok_or_else(|| AppError::BadRequest("Missing required 'title' field".into()))?;

    require_non_blank(&title, "title")?;
    validate_mime_type(&file.mime_type)?;
    validate_upload_size(file.data.len())?;
    if let Some(visibility) = &form.visibility {
        validate_visibility(visibility)?;
    }
    ensure_course_exists(&state, course_id).await?;

    let staged = state
        .material_store
        .stage(&file.filename, &file.mime_type, &file.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let create_dto = CreateMaterial {
        course_id,
        title,
        file_key: staged.key().to_string(),
        file_url: MaterialStore::url_for(staged.key()),
        mime_type: staged.mime_type().to_string(),
        size_bytes: staged.size_bytes(),
        visibility: form.visibility,
    };

    let material = MaterialRepo::create(&state.pool, &create_dto).await?;

    // Row exists; keep the file.
    staged.commit();

    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// PUT /api/v1/courses/{course_id}/materials/{id}
///
/// Update a material. Multipart fields are all optional: a new `file`
/// replaces the stored one, `title` and `visibility` update metadata.
/// The old file is only removed after the row points at the new one.
pub async fn update(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Material>>> {
    let form = parse_material_form(multipart).await?;

    if let Some(title) = &form.title {
        require_non_blank(title, "title")?;
    }
    if let Some(visibility) = &form.visibility {
        validate_visibility(visibility)?;
    }

    let existing = MaterialRepo::find_by_id(&state.pool, course_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;

    let meta = UpdateMaterial {
        title: form.title,
        visibility: form.visibility,
    };

    let material = match form.file {
        Some(file) => {
            validate_mime_type(&file.mime_type)?;
            validate_upload_size(file.data.len())?;

            let staged = state
                .material_store
                .stage(&file.filename, &file.mime_type, &file.data)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

            let replacement = ReplaceMaterialFile {
                file_key: staged.key().to_string(),
                file_url: MaterialStore::url_for(staged.key()),
                mime_type: staged.mime_type().to_string(),
                size_bytes: staged.size_bytes(),
            };

            let updated = MaterialRepo::replace_file(&state.pool, course_id, id, &replacement, &meta)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Material",
                    id,
                }))?;

            staged.commit();
            state.material_store.delete(&existing.file_key).await;

            updated
        }
        None => MaterialRepo::update(&state.pool, course_id, id, &meta)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Material",
                id,
            }))?,
    };

    Ok(Json(DataResponse { data: material }))
}

/// DELETE /api/v1/courses/{course_id}/materials/{id}
///
/// Remove the stored file, then the row. A missing file on disk does not
/// block the delete.
pub async fn delete(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    let material = MaterialRepo::find_by_id(&state.pool, course_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;

    state.material_store.delete(&material.file_key).await;
    MaterialRepo::delete(&state.pool, course_id, id).await?;

    Ok(Json(MessageResponse {
        message: "Material deleted".to_string(),
    }))
}

/// Drain a multipart stream into a [`MaterialForm`]. Unknown fields are
/// ignored. The whole body is buffered before any validation so the
/// handlers can check everything up front.
async fn parse_material_form(mut multipart: Multipart) -> Result<MaterialForm, AppError> {
    let mut form = MaterialForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(UploadedFile {
                    filename,
                    mime_type,
                    data: data.to_vec(),
                });
            }
            "title" => {
                form.title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "visibility" => {
                form.visibility = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

async fn ensure_course_exists(state: &AppState, course_id: DbId) -> Result<(), AppError> {
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    Ok(())
}
