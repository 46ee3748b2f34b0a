pub mod admin;
pub mod auth;
pub mod courses;
pub mod faqs;
pub mod health;
pub mod posts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                get, update, deactivate
///
/// /courses                                         list, create
/// /courses/{id}                                    get, update, delete
/// /courses/{course_id}/modules                     list, create
/// /courses/{course_id}/modules/reorder             bulk reorder (PUT)
/// /courses/{course_id}/modules/{id}                get, update, delete
/// /courses/{course_id}/sessions                    list, create
/// /courses/{course_id}/sessions/{id}               get, update, delete
/// /courses/{course_id}/sessions/{id}/status        set status (PUT)
/// /courses/{course_id}/materials                   list, upload (multipart)
/// /courses/{course_id}/materials/{id}              get, update (multipart), delete
///
/// /posts                                           list, create
/// /posts/{id}                                      get, update, delete
///
/// /faqs                                            list, create (admin only)
/// /faqs/{id}                                       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management).
        .nest("/admin", admin::router())
        // Course routes (also nest modules, sessions, materials).
        .nest("/courses", courses::router())
        // Blog posts.
        .nest("/posts", posts::router())
        // FAQ entries.
        .nest("/faqs", faqs::router())
}
