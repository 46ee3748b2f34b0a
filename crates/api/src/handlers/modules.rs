//! Handlers for course modules, nested under `/courses/{course_id}/modules`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cradle_core::course::require_non_blank;
use cradle_core::error::CoreError;
use cradle_core::types::DbId;
use cradle_db::models::course_module::{CourseModule, CreateCourseModule, UpdateCourseModule};
use cradle_db::repositories::{CourseModuleRepo, CourseRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCourseManager;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `PUT /courses/{course_id}/modules/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub module_ids: Vec<DbId>,
}

/// GET /api/v1/courses/{course_id}/modules
///
/// List a course's modules ordered by `sort_order`.
pub async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CourseModule>>>> {
    ensure_course_exists(&state, course_id).await?;
    let modules = CourseModuleRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: modules }))
}

/// GET /api/v1/courses/{course_id}/modules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<CourseModule>>> {
    let module = CourseModuleRepo::find_by_id(&state.pool, course_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CourseModule",
            id,
        }))?;
    Ok(Json(DataResponse { data: module }))
}

/// POST /api/v1/courses/{course_id}/modules
pub async fn create(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateCourseModule>,
) -> AppResult<(StatusCode, Json<DataResponse<CourseModule>>)> {
    require_non_blank(&input.title, "title")?;
    ensure_course_exists(&state, course_id).await?;

    let module = CourseModuleRepo::create(&state.pool, course_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: module })))
}

/// PUT /api/v1/courses/{course_id}/modules/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCourseModule>,
) -> AppResult<Json<DataResponse<CourseModule>>> {
    if let Some(title) = &input.title {
        require_non_blank(title, "title")?;
    }

    let module = CourseModuleRepo::update(&state.pool, course_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CourseModule",
            id,
        }))?;

    Ok(Json(DataResponse { data: module }))
}

/// DELETE /api/v1/courses/{course_id}/modules/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = CourseModuleRepo::delete(&state.pool, course_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CourseModule",
            id,
        }));
    }

    Ok(Json(MessageResponse {
        message: "Module deleted".to_string(),
    }))
}

/// PUT /api/v1/courses/{course_id}/modules/reorder
///
/// Rewrite the `sort_order` of every listed module to its array position,
/// in one transaction. Ids from other courses are ignored. Returns the
/// full module list in the new order.
pub async fn reorder(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(course_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<CourseModule>>>> {
    if input.module_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "'module_ids' must not be empty".into(),
        )));
    }
    ensure_course_exists(&state, course_id).await?;

    let modules = CourseModuleRepo::reorder(&state.pool, course_id, &input.module_ids).await?;
    Ok(Json(DataResponse { data: modules }))
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
