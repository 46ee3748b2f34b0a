//! Handlers for course sessions, nested under `/courses/{course_id}/sessions`.
//!
//! Time ranges and capacity values are stored as given. The scheduling
//! workflow treats them as advisory, so an inverted range or a zero
//! capacity is valid input; only the enum-valued fields are checked.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cradle_core::error::CoreError;
use cradle_core::session::{validate_meeting_type, validate_session_status};
use cradle_core::types::DbId;
use cradle_db::models::course_session::{
    CourseSession, CreateCourseSession, UpdateCourseSession,
};
use cradle_db::repositories::{CourseRepo, CourseSessionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCourseManager;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `PUT /courses/{course_id}/sessions/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// GET /api/v1/courses/{course_id}/sessions
///
/// List a course's sessions, soonest first.
pub async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CourseSession>>>> {
    ensure_course_exists(&state, course_id).await?;
    let sessions = CourseSessionRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/courses/{course_id}/sessions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<CourseSession>>> {
    let session = CourseSessionRepo::find_by_id(&state.pool, course_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CourseSession",
            id,
        }))?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/courses/{course_id}/sessions
pub async fn create(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateCourseSession>,
) -> AppResult<(StatusCode, Json<DataResponse<CourseSession>>)> {
    if let Some(meeting_type) = &input.meeting_type {
        validate_meeting_type(meeting_type)?;
    }
    ensure_course_exists(&state, course_id).await?;

    let session = CourseSessionRepo::create(&state.pool, course_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// PUT /api/v1/courses/{course_id}/sessions/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCourseSession>,
) -> AppResult<Json<DataResponse<CourseSession>>> {
    if let Some(meeting_type) = &input.meeting_type {
        validate_meeting_type(meeting_type)?;
    }

    let session = CourseSessionRepo::update(&state.pool, course_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CourseSession",
            id,
        }))?;

    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/courses/{course_id}/sessions/{id}/status
///
/// Set the session's status. Any-to-any transitions are allowed; only the
/// value itself is validated.
pub async fn set_status(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<DataResponse<CourseSession>>> {
    validate_session_status(&input.status)?;

    let session = CourseSessionRepo::set_status(&state.pool, course_id, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CourseSession",
            id,
        }))?;

    Ok(Json(DataResponse { data: session }))
}

/// DELETE /api/v1/courses/{course_id}/sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path((course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = CourseSessionRepo::delete(&state.pool, course_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CourseSession",
            id,
        }));
    }

    Ok(Json(MessageResponse {
        message: "Session deleted".to_string(),
    }))
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
