use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /by-slug/{slug}                     -> get_by_slug
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
/// GET    /{id}/lines                         -> list_lines
/// POST   /{id}/lines                         -> create_line
/// GET    /{id}/attribute-values              -> list_attribute_values
/// POST   /{id}/attribute-values              -> link_attribute_value
/// DELETE /{id}/attribute-values/{value_id}   -> unlink_attribute_value
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/by-slug/{slug}", get(product::get_by_slug))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route(
            "/{id}/lines",
            get(product::list_lines).post(product::create_line),
        )
        .route(
            "/{id}/attribute-values",
            get(product::list_attribute_values).post(product::link_attribute_value),
        )
        .route(
            "/{id}/attribute-values/{value_id}",
            delete(product::unlink_attribute_value),
        )
}
