//! Handlers for the `/faqs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cradle_core::course::require_non_blank;
use cradle_core::error::CoreError;
use cradle_core::types::DbId;
use cradle_db::models::faq::{CreateFaq, Faq, UpdateFaq};
use cradle_db::repositories::FaqRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/faqs
///
/// List FAQ entries ordered by `sort_order`. Inactive entries are hidden
/// unless `?include_inactive=true`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Faq>>>> {
    let faqs = FaqRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: faqs }))
}

/// GET /api/v1/faqs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Faq>>> {
    let faq = FaqRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Faq", id }))?;
    Ok(Json(DataResponse { data: faq }))
}

/// POST /api/v1/faqs
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateFaq>,
) -> AppResult<(StatusCode, Json<DataResponse<Faq>>)> {
    require_non_blank(&input.question, "question")?;
    require_non_blank(&input.answer, "answer")?;

    let faq = FaqRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: faq })))
}

/// PUT /api/v1/faqs/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaq>,
) -> AppResult<Json<DataResponse<Faq>>> {
    if let Some(question) = &input.question {
        require_non_blank(question, "question")?;
    }
    if let Some(answer) = &input.answer {
        require_non_blank(answer, "answer")?;
    }

    let faq = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Faq", id }))?;

    Ok(Json(DataResponse { data: faq }))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = FaqRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Faq", id }));
    }

    Ok(Json(MessageResponse {
        message: "FAQ deleted".to_string(),
    }))
}
