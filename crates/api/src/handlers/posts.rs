//! Handlers for the `/posts` resource (blog content).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cradle_core::course::require_non_blank;
use cradle_core::error::CoreError;
use cradle_core::pagination::{clamp_limit, clamp_page, page_offset};
use cradle_core::types::DbId;
use cradle_db::models::post::{CreatePost, Post, UpdatePost};
use cradle_db::repositories::PostRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCourseManager;
use crate::response::{DataResponse, MessageResponse, PaginatedResponse, Pagination};
use crate::state::AppState;

const POST_STATUS_DRAFT: &str = "draft";
const POST_STATUS_PUBLISHED: &str = "published";

/// Query parameters for `GET /posts`.
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/v1/posts
///
/// List posts newest first, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> AppResult<Json<PaginatedResponse<Post>>> {
    if let Some(status) = &params.status {
        validate_post_status(status)?;
    }

    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);
    let offset = page_offset(page, limit);

    let (posts, total) =
        PostRepo::list(&state.pool, params.status.as_deref(), limit, offset).await?;

    Ok(Json(PaginatedResponse {
        data: posts,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts
pub async fn create(
    State(state): State<AppState>,
    RequireCourseManager(author): RequireCourseManager,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<DataResponse<Post>>)> {
    require_non_blank(&input.slug, "slug")?;
    require_non_blank(&input.title, "title")?;
    require_non_blank(&input.content, "content")?;
    if let Some(status) = &input.status {
        validate_post_status(status)?;
    }

    if PostRepo::slug_exists(&state.pool, &input.slug, None).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "A post with slug '{}' already exists",
            input.slug
        ))));
    }

    let post = PostRepo::create(&state.pool, Some(author.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<DataResponse<Post>>> {
    if let Some(slug) = &input.slug {
        require_non_blank(slug, "slug")?;
        if PostRepo::slug_exists(&state.pool, slug, Some(id)).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "A post with slug '{slug}' already exists"
            ))));
        }
    }
    if let Some(title) = &input.title {
        require_non_blank(title, "title")?;
    }
    if let Some(content) = &input.content {
        require_non_blank(content, "content")?;
    }
    if let Some(status) = &input.status {
        validate_post_status(status)?;
    }

    let post = PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCourseManager(_manager): RequireCourseManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = PostRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Post", id }));
    }

    Ok(Json(MessageResponse {
        message: "Post deleted".to_string(),
    }))
}

fn validate_post_status(status: &str) -> Result<(), AppError> {
    if status == POST_STATUS_DRAFT || status == POST_STATUS_PUBLISHED {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: [\"draft\", \"published\"]"
        ))))
    }
}
