//! Handlers for the `/courses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cradle_core::course::{
    require_non_blank, validate_mode, validate_price_type, validate_status,
};
use cradle_core::error::CoreError;
use cradle_core::pagination::{clamp_limit, clamp_page, page_offset};
use cradle_core::types::DbId;
use cradle_db::models::course::{Course, CourseFilter, CreateCourse, UpdateCourse};
use cradle_db::repositories::{CourseRepo, MaterialRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireCourseManager};
use crate::response::{DataResponse, MessageResponse, PaginatedResponse, Pagination};
use crate::state::AppState;

/// Query parameters for `GET /courses`.
#[derive(Debug, Default, Deserialize)]
pub struct CourseListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub instructor_id: Option<DbId>,
}

/// GET /api/v1/courses
///
/// List courses with optional filters and page/limit pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> AppResult<Json<PaginatedResponse<Course>>> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }

    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = page_offset(page, limit);

    let filter = CourseFilter {
        search: params.search,
        status: params.status,
        featured: params.featured,
        instructor_id: params.instructor_id,
    };

    let (courses, total) = CourseRepo::list(&state.pool, &filter, limit, offset).await?;

    Ok(Json(PaginatedResponse {
        data: courses,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/courses
///
/// Create a course. Requires the course-management permission. Duplicate
/// slugs are rejected with 400 by an explicit pre-check; the unique
/// constraint remains as the race backstop (409).
pub async fn create(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    validate_course_fields(
        Some(&input.slug),
        Some(&input.title),
        Some(&input.target_audience),
        Some(&input.description),
        input.price_type.as_deref(),
        input.mode.as_deref(),
        input.status.as_deref(),
    )?;

    if CourseRepo::slug_exists(&state.pool, &input.slug, None).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "A course with slug '{}' already exists",
            input.slug
        ))));
    }

    let course = CourseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
///
/// Partially update a course. Omitted fields keep their value; a changed
/// slug is re-checked for uniqueness excluding the course itself.
pub async fn update(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<DataResponse<Course>>> {
    validate_course_fields(
        input.slug.as_deref(),
        input.title.as_deref(),
        input.target_audience.as_deref(),
        input.description.as_deref(),
        input.price_type.as_deref(),
        input.mode.as_deref(),
        input.status.as_deref(),
    )?;

    if let Some(slug) = &input.slug {
        if CourseRepo::slug_exists(&state.pool, slug, Some(id)).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "A course with slug '{slug}' already exists"
            ))));
        }
    }

    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/courses/{id}
///
/// Admin-only. Removes the course and, via cascade, its modules, sessions,
/// and material rows. Stored material files are removed first, best-effort,
/// so a file deletion failure never blocks the course delete.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let materials = MaterialRepo::list_by_course(&state.pool, id).await?;
    for material in &materials {
        state.material_store.delete(&material.file_key).await;
    }

    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }

    Ok(Json(MessageResponse {
        message: "Course deleted".to_string(),
    }))
}

/// Shared field validation for create and update. `None` fields are
/// skipped, so create passes everything and update passes only what the
/// client sent.
fn validate_course_fields(
    slug: Option<&str>,
    title: Option<&str>,
    target_audience: Option<&str>,
    description: Option<&str>,
    price_type: Option<&str>,
    mode: Option<&str>,
    status: Option<&str>,
) -> Result<(), AppError> {
    if let Some(slug) = slug {
        require_non_blank(slug, "slug")?;
    }
    if let Some(title) = title {
        require_non_blank(title, "title")?;
    }
    if let Some(target_audience) = target_audience {
        require_non_blank(target_audience, "target_audience")?;
    }
    if let Some(description) = description {
        require_non_blank(description, "description")?;
    }
    if let Some(price_type) = price_type {
        validate_price_type(price_type)?;
    }
    if let Some(mode) = mode {
        validate_mode(mode)?;
    }
    if let Some(status) = status {
        validate_status(status)?;
    }
    Ok(())
}
