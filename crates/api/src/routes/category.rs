use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /by-slug/{slug}   -> get_by_slug
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/children    -> list_children
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route("/by-slug/{slug}", get(category::get_by_slug))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        .route("/{id}/children", get(category::list_children))
}
