//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cradle_core::error::CoreError;
use cradle_core::roles::{Role, COURSE_MANAGER_ROLES};
use serde_json::json;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the course-management permission (`admin` or `instructor`).
///
/// The 403 body includes the actor's actual role and the allowed roles so
/// dashboard clients can show a useful message.
pub struct RequireCourseManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireCourseManager {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !user.role.can_manage_courses() {
            let body = json!({
                "error": "Admin or instructor role required to manage course content",
                "code": "FORBIDDEN",
                "user_role": user.role_name,
                "required_roles": COURSE_MANAGER_ROLES,
            });
            return Err((StatusCode::FORBIDDEN, Json(body)).into_response());
        }

        Ok(RequireCourseManager(user))
    }
}
