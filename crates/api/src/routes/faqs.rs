//! Route definitions for the `/faqs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::faqs;
use crate::state::AppState;

/// Routes mounted at `/faqs`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (admin only)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (admin only)
/// DELETE /{id}    -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faqs::list).post(faqs::create))
        .route(
            "/{id}",
            get(faqs::get_by_id)
                .put(faqs::update)
                .delete(faqs::delete),
        )
}
