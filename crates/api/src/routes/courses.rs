//! Route definitions for `/courses` and its nested sub-resources.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;
use cradle_core::uploads::MAX_UPLOAD_BYTES;

use crate::handlers::{courses, materials, modules, sessions};
use crate::state::AppState;

/// Multipart bodies carry some framing overhead beyond the file itself.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                                      list
/// POST   /                                      create
/// GET    /{id}                                  get_by_id
/// PUT    /{id}                                  update
/// DELETE /{id}                                  delete (admin only)
///
/// GET    /{course_id}/modules                   list_by_course
/// POST   /{course_id}/modules                   create
/// PUT    /{course_id}/modules/reorder           reorder
/// GET    /{course_id}/modules/{id}              get_by_id
/// PUT    /{course_id}/modules/{id}              update
/// DELETE /{course_id}/modules/{id}              delete
///
/// GET    /{course_id}/sessions                  list_by_course
/// POST   /{course_id}/sessions                  create
/// GET    /{course_id}/sessions/{id}             get_by_id
/// PUT    /{course_id}/sessions/{id}             update
/// DELETE /{course_id}/sessions/{id}             delete
/// PUT    /{course_id}/sessions/{id}/status      set_status
///
/// GET    /{course_id}/materials                 list_by_course
/// POST   /{course_id}/materials                 upload (multipart)
/// GET    /{course_id}/materials/{id}            get_by_id
/// PUT    /{course_id}/materials/{id}            update (multipart)
/// DELETE /{course_id}/materials/{id}            delete
/// ```
pub fn router() -> Router<AppState> {
    let module_routes = Router::new()
        .route(
            "/",
            get(modules::list_by_course).post(modules::create),
        )
        .route("/reorder", put(modules::reorder))
        .route(
            "/{id}",
            get(modules::get_by_id)
                .put(modules::update)
                .delete(modules::delete),
        );

    let session_routes = Router::new()
        .route(
            "/",
            get(sessions::list_by_course).post(sessions::create),
        )
        .route(
            "/{id}",
            get(sessions::get_by_id)
                .put(sessions::update)
                .delete(sessions::delete),
        )
        .route("/{id}/status", put(sessions::set_status));

    // Material uploads need a body limit well above axum's 2 MB default.
    let material_routes = Router::new()
        .route(
            "/",
            get(materials::list_by_course).post(materials::upload),
        )
        .route(
            "/{id}",
            get(materials::get_by_id)
                .put(materials::update)
                .delete(materials::delete),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route(
            "/{id}",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
        .nest("/{course_id}/modules", module_routes)
        .nest("/{course_id}/sessions", session_routes)
        .nest("/{course_id}/materials", material_routes)
}
